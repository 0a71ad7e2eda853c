//! Real-time scheduling setup for the control thread (§5 "Scheduling model").
//!
//! The control thread runs under the host's round-robin real-time policy at
//! a fixed priority (70, highest of the four peer threads). Behind the `rt`
//! feature this locks the process's memory pages and sets `SCHED_RR` on the
//! calling thread; without it (the default, and in every test/bench run)
//! both calls are no-ops so the simulation adapters never need root or a
//! real RT-capable kernel.

use crate::error::CycleError;

/// Lock all current and future memory pages, preventing page faults from
/// stealing time from the cycle loop.
#[cfg(feature = "rt")]
fn rt_mlockall() -> Result<(), CycleError> {
    use nix::sys::mman::{mlockall, MlockallFlags};
    mlockall(MlockallFlags::MCL_CURRENT | MlockallFlags::MCL_FUTURE)
        .map_err(|e| CycleError::RtSetup(format!("mlockall failed: {e}")))?;
    Ok(())
}

#[cfg(not(feature = "rt"))]
fn rt_mlockall() -> Result<(), CycleError> {
    Ok(())
}

/// Set the calling thread's scheduling policy to `SCHED_RR` at the given
/// priority (§5: "round-robin real-time policy with fixed priorities").
#[cfg(feature = "rt")]
fn rt_set_scheduler(priority: i32) -> Result<(), CycleError> {
    let param = libc::sched_param { sched_priority: priority };
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_RR, &param) };
    if ret != 0 {
        let err = std::io::Error::last_os_error();
        return Err(CycleError::RtSetup(format!(
            "sched_setscheduler(SCHED_RR, {priority}) failed: {err}"
        )));
    }
    Ok(())
}

#[cfg(not(feature = "rt"))]
fn rt_set_scheduler(_priority: i32) -> Result<(), CycleError> {
    Ok(())
}

/// Perform RT setup for the control thread before entering the cycle loop.
///
/// Must be called once, before [`crate::cycle::CycleRunner::run`]. A
/// failure here is a boot fault: the caller should abort startup rather
/// than run the control loop at default (non-RT) scheduling priority
/// silently, which would defeat the point of the `rt` feature.
pub fn rt_setup(priority: i32) -> Result<(), CycleError> {
    rt_mlockall()?;
    rt_set_scheduler(priority)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_setup_succeeds_without_the_rt_feature() {
        assert!(rt_setup(70).is_ok());
    }
}
