//! Program catalog - the three training days and their exercises

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rest used when a rest label carries no number
pub const DEFAULT_REST_SECS: u32 = 60;

/// Training day identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayId {
    Upper,
    Back,
    Legs,
}

impl DayId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayId::Upper => "upper",
            DayId::Back => "back",
            DayId::Legs => "legs",
        }
    }

    /// Short label used in log listings
    pub fn label(&self) -> &'static str {
        match self {
            DayId::Upper => "Upper Body",
            DayId::Back => "Back & Core",
            DayId::Legs => "Legs & Glutes",
        }
    }

    pub fn all() -> &'static [DayId] {
        &[DayId::Upper, DayId::Back, DayId::Legs]
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DayId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" => Ok(DayId::Upper),
            "back" => Ok(DayId::Back),
            "legs" => Ok(DayId::Legs),
            other => Err(format!("unknown workout day '{}' (expected upper, back or legs)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WarmupStep {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone)]
pub struct Exercise {
    pub name: &'static str,
    pub primary_muscles: &'static str,
    pub secondary_muscles: Option<&'static str>,
    pub sets: usize,
    pub reps: &'static str, // free text: "8-10", "30-60s"
    pub rest: &'static str, // free text: "90s"
    pub instructions: &'static [&'static str],
    pub image_alt: &'static str,
    pub image: Option<&'static str>,
    pub details: Option<&'static str>,
}

impl Exercise {
    /// Rest countdown length in seconds
    pub fn rest_secs(&self) -> u32 {
        parse_rest_seconds(self.rest)
    }
}

#[derive(Debug, Clone)]
pub struct WorkoutDay {
    pub id: DayId,
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub warmup: &'static [WarmupStep],
    pub exercises: &'static [Exercise],
}

/// Parse a rest label into seconds: first run of digits, else the default
pub fn parse_rest_seconds(label: &str) -> u32 {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(DEFAULT_REST_SECS)
}

pub const PROGRAM: &[WorkoutDay] = &[
    WorkoutDay {
        id: DayId::Upper,
        name: "Day 1: Upper Body",
        description: "Focus on chest, shoulders, triceps, and biceps",
        url: "/upper",
        warmup: &[
            WarmupStep { name: "Arm Circles", description: "10 forward, 10 backward" },
            WarmupStep { name: "Shoulder Rolls", description: "10 rolls each direction" },
            WarmupStep { name: "Light Dumbbell Press", description: "10-15 reps with light weight" },
            WarmupStep { name: "Band Pull-aparts", description: "15 reps (or arm swings)" },
        ],
        exercises: &[
            Exercise {
                name: "Bench Press",
                primary_muscles: "Chest",
                secondary_muscles: Some("Shoulders, Triceps"),
                sets: 3,
                reps: "8-10",
                rest: "90s",
                instructions: &[
                    "Lie flat on bench with feet firmly on ground",
                    "Grip bar slightly wider than shoulder-width",
                    "Lower bar to chest with control",
                    "Press up explosively, keeping core tight",
                    "Keep shoulder blades retracted throughout",
                ],
                image_alt: "Bench Press exercise demonstration",
                image: Some("images/day1/Barbell-Bench-Press.gif"),
                details: Some("https://fitnessprogramer.com/exercise/bench-press/"),
            },
            Exercise {
                name: "Dumbbell Rows",
                primary_muscles: "Back",
                secondary_muscles: Some("Biceps"),
                sets: 3,
                reps: "10-12",
                rest: "90s",
                instructions: &[
                    "Hinge at hips, keep back straight",
                    "Pull dumbbells to ribcage",
                    "Squeeze shoulder blades together",
                    "Lower with control",
                    "Keep core engaged throughout",
                ],
                image_alt: "Dumbbell Rows exercise demonstration",
                image: Some("images/day1/Dumbbell-Row.gif"),
                details: Some("https://fitnessprogramer.com/exercise/dumbbell-row/"),
            },
            Exercise {
                name: "Overhead Press",
                primary_muscles: "Shoulders",
                secondary_muscles: Some("Triceps"),
                sets: 3,
                reps: "8-10",
                rest: "90s",
                instructions: &[
                    "Stand with feet shoulder-width apart",
                    "Start with dumbbells at shoulder height",
                    "Press overhead in straight line",
                    "Keep core tight, don't arch back",
                    "Lower with control to starting position",
                ],
                image_alt: "Overhead Press exercise demonstration",
                image: Some("images/day1/Barbell-Standing-Military-Press.gif"),
                details: Some("https://fitnessprogramer.com/exercise/barbell-military-press/"),
            },
            Exercise {
                name: "Dumbbell Curls",
                primary_muscles: "Biceps",
                secondary_muscles: None,
                sets: 3,
                reps: "12-15",
                rest: "60s",
                instructions: &[
                    "Stand with dumbbells at sides",
                    "Keep elbows close to body",
                    "Curl weights up with control",
                    "Squeeze at the top",
                    "Lower slowly to starting position",
                ],
                image_alt: "Dumbbell Curls exercise demonstration",
                image: Some("images/day1/Dumbbell-Curl.gif"),
                details: Some("https://fitnessprogramer.com/exercise/dumbbell-curl/"),
            },
        ],
    },
    WorkoutDay {
        id: DayId::Back,
        name: "Day 2: Back & Core",
        description: "Focus on back muscles, lats, and core strength",
        url: "/back",
        warmup: &[
            WarmupStep { name: "Cat-Cow Stretches", description: "10 slow repetitions" },
            WarmupStep { name: "Arm Swings", description: "10 each direction" },
            WarmupStep { name: "Light Rows", description: "10-15 reps with light weight" },
            WarmupStep { name: "Torso Twists", description: "10 each side" },
        ],
        exercises: &[
            Exercise {
                name: "Bent-over Barbell Rows",
                primary_muscles: "Upper Back",
                secondary_muscles: Some("Biceps"),
                sets: 4,
                reps: "8-10",
                rest: "90s",
                instructions: &[
                    "Hinge at hips, maintain neutral spine",
                    "Pull bar to lower chest/upper abdomen",
                    "Keep elbows close to body",
                    "Squeeze shoulder blades at top",
                    "Lower with control",
                ],
                image_alt: "Bent-over Rows exercise demonstration",
                image: Some("images/day2/Barbell-Bent-Over-Row.gif"),
                details: Some("https://fitnessprogramer.com/exercise/barbell-bent-over-row/"),
            },
            Exercise {
                name: "Single-arm Dumbbell Rows",
                primary_muscles: "Lats",
                secondary_muscles: Some("Rhomboids"),
                sets: 3,
                reps: "10-12",
                rest: "90s",
                instructions: &[
                    "Support yourself on bench with one hand",
                    "Pull dumbbell to hip level",
                    "Keep back straight and core tight",
                    "Focus on lat engagement",
                    "Complete all reps before switching sides",
                ],
                image_alt: "Single-arm Dumbbell Rows exercise demonstration",
                image: Some("images/day2/Dumbbell-Row.gif"),
                details: Some("https://fitnessprogramer.com/exercise/dumbbell-row/"),
            },
            Exercise {
                name: "Face Pulls (Reverse Fly)",
                primary_muscles: "Rear Delts",
                secondary_muscles: Some("Upper Traps"),
                sets: 3,
                reps: "12-15",
                rest: "60s",
                instructions: &[
                    "Bend forward slightly with dumbbells",
                    "Lift arms out to sides, squeezing shoulder blades",
                    "Focus on rear delt activation",
                    "Keep slight bend in elbows",
                    "Lower with control",
                ],
                image_alt: "Face Pulls exercise demonstration",
                image: Some("images/day2/Bent-Over-Lateral-Raise.gif"),
                details: Some("https://fitnessprogramer.com/exercise/bent-over-lateral-raise/"),
            },
            Exercise {
                name: "Plank Hold",
                primary_muscles: "Core",
                secondary_muscles: Some("Shoulders"),
                sets: 3,
                reps: "30-60s",
                rest: "60s",
                instructions: &[
                    "Support body on forearms and toes",
                    "Keep body in straight line",
                    "Engage core and glutes",
                    "Don't let hips sag or pike up",
                    "Breathe steadily throughout hold",
                ],
                image_alt: "Plank exercise demonstration",
                image: Some("images/day2/plank.gif"),
                details: Some("https://fitnessprogramer.com/exercise/plank/"),
            },
        ],
    },
    WorkoutDay {
        id: DayId::Legs,
        name: "Day 3: Legs & Glutes",
        description: "Focus on quads, hamstrings, glutes, and calves",
        url: "/legs",
        warmup: &[
            WarmupStep { name: "Bodyweight Squats", description: "10-15 slow repetitions" },
            WarmupStep { name: "Leg Swings", description: "10 each direction, each leg" },
            WarmupStep { name: "Walking Lunges", description: "10 steps total" },
            WarmupStep { name: "Glute Bridges", description: "15 repetitions" },
        ],
        exercises: &[
            Exercise {
                name: "Barbell Squats",
                primary_muscles: "Quads",
                secondary_muscles: Some("Glutes, Hamstrings"),
                sets: 4,
                reps: "8-10",
                rest: "120s",
                instructions: &[
                    "Stand with feet shoulder-width apart",
                    "Keep chest up and core braced",
                    "Lower until thighs parallel to floor",
                    "Drive through heels to stand",
                    "Keep knees tracking over toes",
                ],
                image_alt: "Barbell Squats exercise demonstration",
                image: Some("images/day3/BARBELL-SQUAT.gif"),
                details: Some("https://fitnessprogramer.com/exercise/squat/"),
            },
            Exercise {
                name: "Romanian Deadlifts",
                primary_muscles: "Hamstrings",
                secondary_muscles: Some("Glutes"),
                sets: 3,
                reps: "10-12",
                rest: "90s",
                instructions: &[
                    "Start standing with bar at hip level",
                    "Hinge at hips, pushing them back",
                    "Keep bar close to legs",
                    "Feel stretch in hamstrings",
                    "Drive hips forward to return to start",
                ],
                image_alt: "Romanian Deadlifts exercise demonstration",
                image: Some("images/day3/Barbell-Romanian-Deadlift.gif"),
                details: Some("https://fitnessprogramer.com/exercise/romanian-deadlift/"),
            },
            Exercise {
                name: "Dumbbell Lunges",
                primary_muscles: "Quads",
                secondary_muscles: Some("Glutes"),
                sets: 3,
                reps: "10-12",
                rest: "90s",
                instructions: &[
                    "Step forward into lunge position",
                    "Lower until both knees at 90 degrees",
                    "Keep front knee over ankle",
                    "Push through front heel to return",
                    "Alternate legs or complete one side first",
                ],
                image_alt: "Dumbbell Lunges exercise demonstration",
                image: Some("images/day3/dumbbell-lunges.gif"),
                details: Some("https://fitnessprogramer.com/exercise/dumbbell-walking-lunge/"),
            },
            Exercise {
                name: "Calf Raises",
                primary_muscles: "Calves",
                secondary_muscles: None,
                sets: 3,
                reps: "15-20",
                rest: "60s",
                instructions: &[
                    "Stand with dumbbells at sides",
                    "Rise up on toes as high as possible",
                    "Squeeze calves at the top",
                    "Lower slowly with control",
                    "Use a step for increased range of motion",
                ],
                image_alt: "Calf Raises exercise demonstration",
                image: Some("images/day3/Dumbbell-Calf-Raise.gif"),
                details: Some("https://fitnessprogramer.com/exercise/calf-raise/"),
            },
        ],
    },
];

pub fn program() -> &'static [WorkoutDay] {
    PROGRAM
}

pub fn find_day(id: DayId) -> &'static WorkoutDay {
    // PROGRAM holds one entry per DayId
    PROGRAM
        .iter()
        .find(|d| d.id == id)
        .unwrap_or(&PROGRAM[0])
}

/// Find day by its url path ("/upper", "/back", "/legs")
pub fn find_day_by_path(path: &str) -> Option<&'static WorkoutDay> {
    let path = path.trim_end_matches('/');
    PROGRAM.iter().find(|d| d.url == path)
}

pub fn exercises_by_day(id: DayId) -> Vec<&'static str> {
    find_day(id).exercises.iter().map(|e| e.name).collect()
}

pub fn all_exercise_names() -> Vec<&'static str> {
    PROGRAM
        .iter()
        .flat_map(|d| d.exercises.iter().map(|e| e.name))
        .collect()
}

/// Find exercise by name (case-insensitive)
pub fn find_exercise(name: &str) -> Option<&'static Exercise> {
    PROGRAM
        .iter()
        .flat_map(|d| d.exercises.iter())
        .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
}
