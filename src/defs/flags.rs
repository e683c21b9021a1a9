use bitflags::bitflags;

bitflags! {
    /// Runtime state bits carried by every arena entity.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ActorFlags: u8 {
        // Drawn and considered by collision checks.
        const ACTIVE     = 0b0000_0001;
        // Cleared while the entity's weapon is mid-swing.
        const CAN_MOVE   = 0b0000_0010;
        // Dropped from the roster at the end of the current tick.
        const TO_REMOVE  = 0b0000_0100;
        // Struck by an opposing weapon this tick; freezes weapon cooldown.
        const BEING_HIT  = 0b0000_1000;
    }
}

impl ActorFlags {
    /// State of a freshly spawned entity.
    pub const SPAWN: ActorFlags = ActorFlags::ACTIVE.union(ActorFlags::CAN_MOVE);

    /// Solid for collision purposes: active and not already on its way out.
    #[inline]
    pub fn is_solid(self) -> bool {
        self.contains(ActorFlags::ACTIVE) && !self.contains(ActorFlags::TO_REMOVE)
    }
}
