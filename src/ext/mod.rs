mod best_effort_path_ext;

pub use best_effort_path_ext::{BestEffortPathExt, LossyNameExt, best_effort_path_display};
