pub mod method_not_allowed;
pub mod trace_id;

pub use method_not_allowed::json_method_not_allowed;
pub use trace_id::{extract_trace_id, trace_id_middleware, TraceId, TRACE_ID_HEADER};
