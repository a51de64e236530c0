//! Local player slots for split-screen sessions.
//!
//! Each joined player gets the lowest free slot and a camera output channel `1 << slot`.

/// Maximum simultaneous players; one bit of a `u32` channel mask each.
pub const MAX_PLAYERS: usize = 32;

/// A joined player's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerSlot(u8);

impl PlayerSlot {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Output channel bit for this player's camera.
    pub fn channel_mask(self) -> u32 {
        1 << self.0
    }
}

/// Tracks which slots are taken.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    occupied: u32,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lowest free slot, or `None` when every slot is in use.
    pub fn join(&mut self) -> Option<PlayerSlot> {
        let free = (!self.occupied).trailing_zeros();
        if free as usize >= MAX_PLAYERS {
            log::warn!("Player join rejected: all {} slots taken", MAX_PLAYERS);
            return None;
        }
        self.occupied |= 1 << free;
        let slot = PlayerSlot(free as u8);
        log::info!("Player joined in slot {} ({} playing)", free, self.count());
        Some(slot)
    }

    /// Free a slot. Returns false if it was not taken.
    pub fn leave(&mut self, slot: PlayerSlot) -> bool {
        let bit = slot.channel_mask();
        if self.occupied & bit == 0 {
            return false;
        }
        self.occupied &= !bit;
        log::info!("Player left slot {} ({} playing)", slot.0, self.count());
        true
    }

    pub fn count(&self) -> usize {
        self.occupied.count_ones() as usize
    }

    pub fn is_taken(&self, slot: PlayerSlot) -> bool {
        self.occupied & slot.channel_mask() != 0
    }

    /// Union of all joined players' channel masks.
    pub fn active_channels(&self) -> u32 {
        self.occupied
    }
}
