use vox_core::Error;

/// Registration progress. Transitions only ever go `Basic -> Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// Basic identity captured; account inactive.
    Basic = 1,
    /// Role profile and identity proof captured; account active.
    Complete = 2,
}

impl Step {
    /// Step the account moves to next, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Basic => Some(Self::Complete),
            Self::Complete => None,
        }
    }
}

impl From<Step> for i16 {
    fn from(step: Step) -> Self {
        step as i16
    }
}

impl TryFrom<i16> for Step {
    type Error = Error;
    fn try_from(n: i16) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::Basic),
            2 => Ok(Self::Complete),
            _ => Err(Error::internal(format!("invalid registration step {}", n))),
        }
    }
}

impl serde::Serialize for Step {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i16(i16::from(*self))
    }
}
