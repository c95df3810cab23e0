//! Loop scheduling flags.

bitflags::bitflags! {
    /// Work owed by the chart loop.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LoopFlags: u8 {
        /// Data, view or surface changed; derived state must be recomputed.
        const SHOULD_UPDATE = 0b0000_0001;
        /// Derived state changed; a frame must be drawn.
        const SHOULD_RENDER = 0b0000_0010;
        /// Host requested teardown. Never cleared.
        const SHOULD_STOP = 0b0000_0100;
    }
}

impl LoopFlags {
    /// Check if the next tick has any work to do.
    pub fn has_pending_work(&self) -> bool {
        self.intersects(Self::SHOULD_UPDATE | Self::SHOULD_RENDER)
    }

    /// Check if the loop has been asked to stop.
    pub fn is_stopped(&self) -> bool {
        self.contains(Self::SHOULD_STOP)
    }
}

/// Whether the host should keep scheduling ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// What a single loop tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Derived state was recomputed.
    pub updated: bool,
    /// A frame was drawn.
    pub rendered: bool,
    pub control: LoopControl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_work() {
        assert!(!LoopFlags::empty().has_pending_work());
        assert!(LoopFlags::SHOULD_RENDER.has_pending_work());
        assert!(!LoopFlags::SHOULD_STOP.has_pending_work());
    }

    #[test]
    fn test_stop_flag_survives_clear_of_work() {
        let mut flags = LoopFlags::SHOULD_UPDATE | LoopFlags::SHOULD_STOP;
        flags.remove(LoopFlags::SHOULD_UPDATE);
        assert!(flags.is_stopped());
    }
}
