//! Easing curves for waypath.
//!
//! An easing maps normalized time to normalized progress. Every curve here
//! satisfies `ease(0) = 0` and `ease(1) = 1`; some (back, elastic) leave
//! `[0, 1]` in between.
//!
//! Out and in-out variants are derived from the in curve of each family:
//! `out(t) = 1 - in(1 - t)`, and in-out runs `in` over the first half and
//! `out` over the second.
//!
//! ```
//! use rhizome_waypath_easing::Ease;
//!
//! let ease: Ease = "cubic_in_out".parse().unwrap();
//! assert_eq!(ease.apply(0.5), 0.5);
//! ```

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Easing function type.
pub type EaseFn = fn(f32) -> f32;

/// Error returned when parsing an unknown easing name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown easing: {0}")]
pub struct UnknownEase(pub String);

macro_rules! eases {
    ($($variant:ident => $name:literal, $func:expr;)*) => {
        /// Named easing curves.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum Ease {
            /// Constant speed.
            #[default]
            Linear,
            $(
                #[doc = concat!("`", $name, "` curve.")]
                $variant,
            )*
        }

        impl Ease {
            /// Every easing, linear first.
            pub const ALL: &'static [Ease] = &[Ease::Linear, $(Ease::$variant,)*];

            /// Snake-case name, as accepted by [`FromStr`].
            pub const fn name(self) -> &'static str {
                match self {
                    Ease::Linear => "linear",
                    $(Ease::$variant => $name,)*
                }
            }

            /// Returns the corresponding function pointer.
            pub fn as_fn(self) -> EaseFn {
                match self {
                    Ease::Linear => linear,
                    $(Ease::$variant => $func as EaseFn,)*
                }
            }
        }
    };
}

eases! {
    QuadIn => "quad_in", quad_in;
    QuadOut => "quad_out", |t: f32| out(quad_in, t);
    QuadInOut => "quad_in_out", |t: f32| in_out(quad_in, t);
    CubicIn => "cubic_in", cubic_in;
    CubicOut => "cubic_out", |t: f32| out(cubic_in, t);
    CubicInOut => "cubic_in_out", |t: f32| in_out(cubic_in, t);
    QuartIn => "quart_in", quart_in;
    QuartOut => "quart_out", |t: f32| out(quart_in, t);
    QuartInOut => "quart_in_out", |t: f32| in_out(quart_in, t);
    QuintIn => "quint_in", quint_in;
    QuintOut => "quint_out", |t: f32| out(quint_in, t);
    QuintInOut => "quint_in_out", |t: f32| in_out(quint_in, t);
    SineIn => "sine_in", sine_in;
    SineOut => "sine_out", |t: f32| out(sine_in, t);
    SineInOut => "sine_in_out", |t: f32| in_out(sine_in, t);
    ExpoIn => "expo_in", expo_in;
    ExpoOut => "expo_out", |t: f32| out(expo_in, t);
    ExpoInOut => "expo_in_out", |t: f32| in_out(expo_in, t);
    CircIn => "circ_in", circ_in;
    CircOut => "circ_out", |t: f32| out(circ_in, t);
    CircInOut => "circ_in_out", |t: f32| in_out(circ_in, t);
    BackIn => "back_in", back_in;
    BackOut => "back_out", |t: f32| out(back_in, t);
    BackInOut => "back_in_out", |t: f32| in_out(back_in, t);
    ElasticIn => "elastic_in", elastic_in;
    ElasticOut => "elastic_out", |t: f32| out(elastic_in, t);
    ElasticInOut => "elastic_in_out", |t: f32| in_out(elastic_in, t);
    BounceIn => "bounce_in", |t: f32| 1.0 - bounce_out(1.0 - t);
    BounceOut => "bounce_out", bounce_out;
    BounceInOut => "bounce_in_out", |t: f32| in_out(|x: f32| 1.0 - bounce_out(1.0 - x), t);
}

impl Ease {
    /// Evaluates the easing at `t`. Callers clamp `t` to `[0, 1]`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        (self.as_fn())(t)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = UnknownEase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ease::ALL
            .iter()
            .copied()
            .find(|ease| ease.name() == s)
            .ok_or_else(|| UnknownEase(s.to_string()))
    }
}

/// Mirrors an in curve into its out counterpart.
#[inline]
pub fn out(ease_in: EaseFn, t: f32) -> f32 {
    1.0 - ease_in(1.0 - t)
}

/// Runs an in curve over the first half and its mirror over the second.
#[inline]
pub fn in_out(ease_in: EaseFn, t: f32) -> f32 {
    if t < 0.5 {
        ease_in(2.0 * t) / 2.0
    } else {
        1.0 - ease_in(2.0 - 2.0 * t) / 2.0
    }
}

/// No easing.
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[inline]
pub fn quad_in(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

#[inline]
pub fn quart_in(t: f32) -> f32 {
    t * t * t * t
}

#[inline]
pub fn quint_in(t: f32) -> f32 {
    t * t * t * t * t
}

#[inline]
pub fn sine_in(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

#[inline]
pub fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2.0f32.powf(10.0 * t - 10.0)
    }
}

#[inline]
pub fn circ_in(t: f32) -> f32 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

/// Pulls back slightly before moving forward.
#[inline]
pub fn back_in(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    C3 * t * t * t - C1 * t * t
}

/// Oscillates with growing amplitude before snapping to the end.
#[inline]
pub fn elastic_in(t: f32) -> f32 {
    const C4: f32 = (2.0 * PI) / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        -(2.0f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
    }
}

/// Bounces against the end value like a dropped ball.
#[inline]
pub fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}
