/// Number of architecturally visible general-purpose registers (`A..J`).
pub const REGISTER_COUNT: usize = 8;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2,
    X = 3,
    Y = 4,
    Z = 5,
    I = 6,
    J = 7,
}

impl Register {
    /// Ordered list of all architectural general-purpose registers.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::X,
        Self::Y,
        Self::Z,
        Self::I,
        Self::J,
    ];

    /// Returns the register-file index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 3-bit register field into an architectural register.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::X),
            4 => Some(Self::Y),
            5 => Some(Self::Z),
            6 => Some(Self::I),
            7 => Some(Self::J),
            _ => None,
        }
    }
}
