use std::fmt;

/// Position of a landmark within its quantity space. Point values occupy
/// even ordinals, interval values odd ordinals, so point-ness is a parity
/// property of the ordinal itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Magnitude(pub usize);

impl Magnitude {
    pub const fn ordinal(self) -> usize {
        self.0
    }

    pub const fn is_point(self) -> bool {
        self.0 % 2 == 0
    }

    pub const fn is_interval(self) -> bool {
        !self.is_point()
    }

    /// Ordinal distance to another magnitude of the same space.
    pub fn distance(self, other: Magnitude) -> usize {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, finite list of landmark values for one quantity. Order is the
/// dimension along which the quantity's magnitude moves; the `zero` ordinal
/// anchors the below/at/above-zero sign used by Influence relations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantitySpace {
    landmarks: Vec<String>,
    zero: usize,
}

impl QuantitySpace {
    pub fn new<I, S>(landmarks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let landmarks: Vec<String> = landmarks.into_iter().map(Into::into).collect();
        assert!(!landmarks.is_empty(), "a quantity space needs at least one landmark");
        Self { landmarks, zero: 0 }
    }

    /// Re-anchor the zero landmark for spaces extending below zero.
    pub fn centered_at(mut self, zero: usize) -> Self {
        assert!(zero < self.landmarks.len());
        self.zero = zero;
        self
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Ordinal of the highest landmark.
    pub fn top(&self) -> Magnitude {
        Magnitude(self.landmarks.len() - 1)
    }

    pub fn bottom(&self) -> Magnitude {
        Magnitude(0)
    }

    pub fn contains(&self, magnitude: Magnitude) -> bool {
        magnitude.0 < self.landmarks.len()
    }

    pub fn ordinal_of(&self, landmark: &str) -> Option<Magnitude> {
        self.landmarks
            .iter()
            .position(|name| name == landmark)
            .map(Magnitude)
    }

    pub fn name_of(&self, magnitude: Magnitude) -> Option<&str> {
        self.landmarks.get(magnitude.0).map(String::as_str)
    }

    /// Sign of a magnitude relative to the zero landmark.
    pub fn magnitude_sign(&self, magnitude: Magnitude) -> i8 {
        if magnitude.0 > self.zero {
            1
        } else if magnitude.0 < self.zero {
            -1
        } else {
            0
        }
    }

    /// Step one ordinal in `sign`'s direction, clamped at the boundaries.
    pub fn step(&self, from: Magnitude, sign: i8) -> Magnitude {
        if sign > 0 {
            Magnitude(from.0.saturating_add(1).min(self.top().0))
        } else if sign < 0 {
            Magnitude(from.0.saturating_sub(1))
        } else {
            from
        }
    }

    pub fn landmarks(&self) -> impl Iterator<Item = &str> {
        self.landmarks.iter().map(String::as_str)
    }
}
