mod asset;
mod backend;
mod event;
mod model_name;
mod run;
mod slot;

pub use asset::*;
pub use backend::*;
pub use event::*;
pub use model_name::*;
pub use run::*;
pub use slot::*;
