//! Control-flow flags.

use bitflags::bitflags;

bitflags! {
    /// Pending non-local control transfer.
    ///
    /// Set by `return`, `break` and `continue`; statement sequences stop
    /// executing while any flag is raised. Loops consume `BREAK_EXECUTED`
    /// and `CONTINUE_EXECUTED`, calls consume `RETURN_EXECUTED`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ControlFlags: u8 {
        const RETURN_EXECUTED = 1 << 0;
        const BREAK_EXECUTED = 1 << 1;
        const CONTINUE_EXECUTED = 1 << 2;

        /// Flags that terminate the enclosing loop.
        const LOOP_EXIT = Self::RETURN_EXECUTED.bits() | Self::BREAK_EXECUTED.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_exit_covers_return_and_break() {
        assert!(ControlFlags::LOOP_EXIT.contains(ControlFlags::RETURN_EXECUTED));
        assert!(ControlFlags::LOOP_EXIT.contains(ControlFlags::BREAK_EXECUTED));
        assert!(!ControlFlags::LOOP_EXIT.intersects(ControlFlags::CONTINUE_EXECUTED));
        assert!(ControlFlags::default().is_empty());
    }
}
