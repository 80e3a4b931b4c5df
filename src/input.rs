use bitflags::bitflags;

bitflags! {
    /// The keys the frame loop acts on. Anything else is dropped while polling.
    #[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
    pub struct Keys: u8 {
        const Escape = 0b01;
        const S      = 0b10;
    }
}

/// Raw events gathered by one `Display::poll_events` call.
///
/// `pressed` and `released` are edge-triggered: a held key shows up in
/// `pressed` only on the poll where it went down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PolledEvents {
    pub close_requested: bool,
    pub pressed: Keys,
    pub released: Keys,
}

impl PolledEvents {
    pub fn close() -> Self {
        PolledEvents {
            close_requested: true,
            ..Default::default()
        }
    }

    pub fn pressed(keys: Keys) -> Self {
        PolledEvents {
            pressed: keys,
            ..Default::default()
        }
    }
}

/// What the frame loop should do this iteration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    pub quit: bool,
    pub save: bool,
}

impl InputSnapshot {
    pub fn from_events(events: &PolledEvents) -> Self {
        InputSnapshot {
            quit: events.close_requested || events.pressed.contains(Keys::Escape),
            save: events.pressed.contains(Keys::S),
        }
    }
}
