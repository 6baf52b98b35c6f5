mod asset_encoder;
mod inference_invoker;
mod request_assembler;
mod runs;
mod session_state;

pub use asset_encoder::*;
pub use inference_invoker::*;
pub use request_assembler::*;
pub use runs::*;
pub use session_state::*;
