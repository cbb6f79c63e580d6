use std::fmt;

/// Which piece of the clock a renderable is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PartRole {
    /// One of the six faces of the backboard.
    BackPrism(u8),
    CasePrism(u8),
    TopShelf(u8),
    BottomLedge(u8),
    BezelBack,
    BezelFront,
    BrassRing,
    DialFace,
    HourMark(u8),
    SecondHand,
    MinuteHand,
    HourHand,
    Hub,
    PendulumShaft,
    PendulumBob,
}

/// Logical grouping of parts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PartGroup {
    Case,
    Dial,
    Hands,
    Pendulum,
}

impl PartRole {
    pub fn group(self) -> PartGroup {
        match self {
            Self::BackPrism(_) | Self::CasePrism(_) | Self::TopShelf(_) | Self::BottomLedge(_) => {
                PartGroup::Case
            }
            Self::BezelBack
            | Self::BezelFront
            | Self::BrassRing
            | Self::DialFace
            | Self::HourMark(_)
            | Self::Hub => PartGroup::Dial,
            Self::SecondHand | Self::MinuteHand | Self::HourHand => PartGroup::Hands,
            Self::PendulumShaft | Self::PendulumBob => PartGroup::Pendulum,
        }
    }

    /// Static parts keep the identity transform for the whole run.
    pub fn is_static(self) -> bool {
        !matches!(
            self,
            Self::HourMark(_)
                | Self::SecondHand
                | Self::MinuteHand
                | Self::HourHand
                | Self::PendulumShaft
                | Self::PendulumBob
        )
    }
}

impl fmt::Display for PartGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Case => "case",
            Self::Dial => "dial",
            Self::Hands => "hands",
            Self::Pendulum => "pendulum",
        };
        f.write_str(name)
    }
}
