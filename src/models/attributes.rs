//! Closed catalog of the studio's subject and shot attributes.
//!
//! Every enum serializes as its display label, which is also the text that
//! ends up in the generation prompt.

use crate::error::StudioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal, $slug:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// All variants in catalog order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn slug(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = StudioError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.label().eq_ignore_ascii_case(needle)
                            || v.slug().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| {
                        StudioError::ConfigError(format!("unknown {} '{}'", $kind, s))
                    })
            }
        }
    };
}

attribute_enum! {
    Gender, "gender" {
        Female => "Female", "female",
        Male => "Male", "male",
        NonBinary => "Non-Binary", "non-binary",
    }
}

attribute_enum! {
    AgeGroup, "age group" {
        YoungAdult => "Young Adult (18-25)", "young-adult",
        Adult => "Adult (26-35)", "adult",
        Mature => "Mature (36-50)", "mature",
        Senior => "Senior (50+)", "senior",
    }
}

attribute_enum! {
    SkinTone, "skin tone" {
        Fair => "Fair", "fair",
        Medium => "Medium", "medium",
        Olive => "Olive", "olive",
        Brown => "Brown", "brown",
        Dark => "Dark", "dark",
    }
}

attribute_enum! {
    FashionStyle, "fashion style" {
        IndianClassic => "Indian Classic (Ethnic)", "indian-classic",
        ModernChic => "Modern Chic", "modern-chic",
        Festive => "Festive & Wedding", "festive",
        WesternCasual => "Western Casual", "western-casual",
        Professional => "Corporate Professional", "professional",
        Streetwear => "Streetwear", "streetwear",
    }
}

attribute_enum! {
    ModelPose, "pose" {
        StandingConfident => "Standing Confident", "standing-confident",
        Walking => "Walking Motion", "walking",
        HandsOnWaist => "Hands on Waist", "hands-on-waist",
        Leaning => "Leaning against wall", "leaning",
        StudioCloseUp => "Studio Portrait (Waist Up)", "studio-close-up",
    }
}

attribute_enum! {
    CameraView, "camera view" {
        Front => "Front View", "front",
        Back => "Back View", "back",
        Left => "Left Side Profile", "left",
        Right => "Right Side Profile", "right",
    }
}

/// One snapshot of the configuration panel. Any combination is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSet {
    pub gender: Gender,
    pub age_group: AgeGroup,
    pub skin_tone: SkinTone,
    pub style: FashionStyle,
    pub pose: ModelPose,
    pub view: CameraView,
}

impl Default for AttributeSet {
    fn default() -> Self {
        AttributeSet {
            gender: Gender::Female,
            age_group: AgeGroup::YoungAdult,
            skin_tone: SkinTone::Medium,
            style: FashionStyle::ModernChic,
            pose: ModelPose::StandingConfident,
            view: CameraView::Front,
        }
    }
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = age_group;
        self
    }

    pub fn with_skin_tone(mut self, skin_tone: SkinTone) -> Self {
        self.skin_tone = skin_tone;
        self
    }

    pub fn with_style(mut self, style: FashionStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_pose(mut self, pose: ModelPose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_view(mut self, view: CameraView) -> Self {
        self.view = view;
        self
    }
}
