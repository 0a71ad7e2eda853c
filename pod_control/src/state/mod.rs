//! PodState — the shared sensor/actuator record (§3) — and the mode
//! state machine (§4.1) that mutates it.

pub mod machine;
pub mod pod_state;

pub use pod_state::PodState;
