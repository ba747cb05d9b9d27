use crate::plan::{Phase, WorkoutType};

/// US Letter, in PDF points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 36.0;

pub const STRIP_RADIUS: f32 = 8.0;

pub const fn inch(v: f32) -> f32 {
    v * 72.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unit-range components as expected by PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    /// Linear interpolation toward `other`, `t` clamped to 0..1.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
        };
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

// Twilight palette.
pub const TWILIGHT_NAVY: Rgb = Rgb::new(0x1a, 0x1a, 0x3e);
pub const DEEP_PURPLE: Rgb = Rgb::new(0x2d, 0x1b, 0x4e);
pub const NEON_PINK: Rgb = Rgb::new(0xff, 0x6b, 0xb3);
pub const CYAN_GLOW: Rgb = Rgb::new(0x7d, 0xd3, 0xfc);
pub const SOFT_WHITE: Rgb = Rgb::new(0xf0, 0xf0, 0xff);
pub const STRIP_PURPLE: Rgb = Rgb::new(0x3d, 0x2a, 0x5c);

pub const PHASE_BASE: Rgb = CYAN_GLOW;
pub const PHASE_BUILD: Rgb = NEON_PINK;
pub const PHASE_PEAK: Rgb = SOFT_WHITE;
pub const PHASE_TAPER: Rgb = Rgb::new(0xa7, 0x8b, 0xfa);
pub const PHASE_RACE: Rgb = Rgb::new(0xfb, 0xbf, 0x24);

pub const WORKOUT_EASY: Rgb = CYAN_GLOW;
pub const WORKOUT_LONG: Rgb = Rgb::new(0xa7, 0x8b, 0xfa);
pub const WORKOUT_TEMPO: Rgb = NEON_PINK;
pub const WORKOUT_INTERVALS: Rgb = Rgb::new(0xf4, 0x72, 0xb6);
pub const WORKOUT_HILL: Rgb = Rgb::new(0xfb, 0x92, 0x3c);
pub const WORKOUT_RACE_PACE: Rgb = Rgb::new(0xfb, 0xbf, 0x24);
pub const WORKOUT_REST: Rgb = Rgb::new(0x6b, 0x72, 0x80);
pub const WORKOUT_CROSS: Rgb = Rgb::new(0x34, 0xd3, 0x99);
pub const WORKOUT_RECOVERY: Rgb = Rgb::new(0x94, 0xa3, 0xb8);

pub fn phase_color(phase: Phase) -> Rgb {
    match phase {
        Phase::Base => PHASE_BASE,
        Phase::Build => PHASE_BUILD,
        Phase::Peak => PHASE_PEAK,
        Phase::Taper => PHASE_TAPER,
        Phase::Race => PHASE_RACE,
        Phase::Other => SOFT_WHITE,
    }
}

pub fn workout_color(kind: WorkoutType) -> Rgb {
    match kind {
        WorkoutType::Easy => WORKOUT_EASY,
        WorkoutType::Long | WorkoutType::Progression => WORKOUT_LONG,
        WorkoutType::Tempo => WORKOUT_TEMPO,
        WorkoutType::Intervals | WorkoutType::Fartlek => WORKOUT_INTERVALS,
        WorkoutType::HillRepeats => WORKOUT_HILL,
        WorkoutType::RacePace => WORKOUT_RACE_PACE,
        WorkoutType::Rest => WORKOUT_REST,
        WorkoutType::CrossTraining => WORKOUT_CROSS,
        WorkoutType::Recovery => WORKOUT_RECOVERY,
        WorkoutType::Other => SOFT_WHITE,
    }
}

pub mod font_size {
    pub const BRAND_TITLE: f32 = 48.0;
    pub const PAGE_TITLE: f32 = 28.0;
    pub const SECTION_HEADER: f32 = 20.0;
    pub const SUBSECTION: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const BODY_SMALL: f32 = 12.0;
    pub const CAPTION: f32 = 10.0;
}

/// Cover/footer branding strings. Defaults match the club branding the
/// document set ships with.
#[derive(Clone, Debug)]
pub struct Branding {
    pub title: String,
    pub author: String,
    pub creator: String,
    pub footer: String,
    pub subject_prefix: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            title: "Reign or Shine".to_string(),
            author: "Reign or Shine Training".to_string(),
            creator: "Reign or Shine PDF Generator".to_string(),
            footer: "Generated with Reign or Shine Training".to_string(),
            subject_prefix: "Marathon Training Plan".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_colors_follow_palette() {
        assert_eq!(phase_color(Phase::Base), CYAN_GLOW);
        assert_eq!(phase_color(Phase::Build), NEON_PINK);
        assert_eq!(phase_color(Phase::Other), SOFT_WHITE);
    }

    #[test]
    fn workout_aliases_share_colors() {
        assert_eq!(
            workout_color(WorkoutType::Fartlek),
            workout_color(WorkoutType::Intervals)
        );
        assert_eq!(
            workout_color(WorkoutType::Progression),
            workout_color(WorkoutType::Long)
        );
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
    }

    #[test]
    fn unit_conversion_is_normalized() {
        let (r, g, b) = Rgb::new(255, 0, 128).to_unit();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 128.0 / 255.0).abs() < 1e-6);
    }
}
