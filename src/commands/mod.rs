pub mod analysis_cmds;

pub use analysis_cmds::AppState;
