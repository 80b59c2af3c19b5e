//! Sound cue identifiers and the sink the simulation reports them to
//!
//! The simulation never touches audio directly; it names a cue and the
//! platform decides how (and whether) to play it.

/// Fire-and-forget sound identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Walk,
    Break,
    Place,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Walk => "walk",
            SoundCue::Break => "break",
            SoundCue::Place => "place",
        }
    }
}

/// Receiver of sound cues
///
/// Implementations must restart a cue that is already playing rather than
/// layering it: the walk cue fires every tick while moving.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records cues in order (tests and replays)
impl SoundSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}
