//! # Prompt catalog
//!
//! Static prompt data for the mentor bot: the default mentor persona and the
//! learning-path topics, grouped into three difficulty levels.
//!
//! ## Usage
//!
//! The dispatcher renders `topics_for(level)` as an inline menu; when the user
//! picks a topic, `topic_prompt(id)` becomes the system prompt for the LLM
//! request and `level_of(id)` decides where the "back" button leads.
//!
//! All data is defined at build time; there is no state and no I/O.

use std::fmt;
use std::str::FromStr;

/// Default system prompt: the mentor persona used when no topic prompt applies.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an AI mentor for FIRST Robotics beginners. Your goal is to help students grow into confident and skilled FIRST Robotics team members.

YOUR ROLE & BEHAVIOR:
- Teach robotics clearly and patiently.
- Explain concepts step by step.
- Encourage students and motivate them at every opportunity.
- Never shame, discourage, or make a user feel bad for their questions.
- Always prefer simple, beginner-friendly explanations first.
- Give practical examples related to actual FIRST Robotics competitions (FRC, FTC, FLL).

HANDLING DIFFICULT QUESTIONS:
- If a user asks a complex or difficult question, break it into smaller, manageable parts.
- Explain each part simply.
- Always ask the user if they want more details or if they're ready to move to the next part.

KNOWLEDGE AREAS:
- FIRST Robotics programs (FRC, FTC, FLL).
- Robot design (mechanisms, drivetrains, manipulators).
- Programming (Java, Python, basic concepts).
- Electronics (wiring, motors, sensors, safety).
- Competition strategy and team collaboration.

IMPORTANT RESOURCES:
- FTC Game Manual: https://ftc-resources.firstinspires.org/ftc/game/manual
- Game Animation Video: https://youtu.be/LCqWA6gSCXA?feature=shared

Remember: Your tone should always be supportive, motivating, and patient. You are here to build their confidence as much as their knowledge!";

/// Learning-path difficulty level. `Beginner` is the fallback wherever a
/// level has to be derived from unknown data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels in menu order.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// Stable identifier used in callback tokens (`level-select:<id>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// Menu title shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            Level::Beginner => "🎯 Beginner Topics",
            Level::Intermediate => "⚙️ Intermediate Topics",
            Level::Advanced => "🏆 Advanced Topics",
        }
    }

    /// Button label for the level-select menu.
    pub fn button_label(&self) -> &'static str {
        match self {
            Level::Beginner => "🎯 Beginner",
            Level::Intermediate => "⚙️ Intermediate",
            Level::Advanced => "🏆 Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(()),
        }
    }
}

/// One learning topic: menu title plus the system prompt that drives the
/// lesson for it.
#[derive(Debug, Clone, Copy)]
pub struct TopicPrompt {
    /// Stable identifier used in callback tokens (`topic-select:<id>`).
    pub id: &'static str,
    /// Button label shown in the topic menu.
    pub title: &'static str,
    /// System prompt sent to the LLM when this topic is selected.
    pub prompt: &'static str,
}

const BEGINNER_TOPICS: [TopicPrompt; 3] = [
    TopicPrompt {
        id: "basics_what_is_first",
        title: "What is FIRST?",
        prompt: "\
Explain what FIRST Robotics is in a beginner-friendly way. Cover:
- What FIRST stands for and its mission
- Different programs (FLL, FTC, FRC)
- What happens at competitions
- Why students join FIRST

Keep it exciting and motivating!",
    },
    TopicPrompt {
        id: "basics_robot_parts",
        title: "Robot Parts",
        prompt: "\
Explain the basic parts of a FIRST robot. Cover:
- Chassis/drivetrain
- Motors and wheels
- Controller/brain
- Power system
- Basic sensors
Use simple analogies (e.g., \"the controller is like the robot's brain\").",
    },
    TopicPrompt {
        id: "basics_team_roles",
        title: "Team Roles",
        prompt: "\
Explain the different roles on a FIRST robotics team:
- Mechanical/build team
- Programming team
- Electrical team
- Drive team
- Business/outreach team
- Design/CAD team
Emphasize that everyone contributes and roles can overlap.",
    },
];

const INTERMEDIATE_TOPICS: [TopicPrompt; 3] = [
    TopicPrompt {
        id: "programming_basics",
        title: "Programming Basics",
        prompt: "\
Introduce programming concepts for robotics:
- What is programming and why robots need it
- Common languages (Java for FRC, Blocks/Java for FTC)
- Basic concepts: variables, loops, functions
- How code controls motors and sensors
Keep it beginner-friendly with simple examples.",
    },
    TopicPrompt {
        id: "electronics_basics",
        title: "Electronics & Wiring",
        prompt: "\
Explain basic robot electronics:
- Motor controllers and what they do
- Types of motors (DC, servo, etc.)
- Sensors (encoders, gyros, limit switches)
- Wiring basics and safety
- Power management
Focus on safety and basic concepts.",
    },
    TopicPrompt {
        id: "mechanisms_basics",
        title: "Robot Mechanisms",
        prompt: "\
Explain common robot mechanisms used in FIRST:
- Drivetrains (tank, mecanum, swerve)
- Lifts and elevators
- Arms and manipulators
- Intakes and grippers
- Shooter mechanisms
Use simple explanations and describe what each does.",
    },
];

const ADVANCED_TOPICS: [TopicPrompt; 3] = [
    TopicPrompt {
        id: "competition_strategy",
        title: "Competition Strategy",
        prompt: "\
Discuss competition strategy for FIRST events:
- Understanding the game manual (https://ftc-resources.firstinspires.org/ftc/game/manual)
- Scoring priorities
- Alliance strategy
- Robot designs for specific tasks
- Scouting and match preparation
Make it practical and game-focused.",
    },
    TopicPrompt {
        id: "autonomous_programming",
        title: "Autonomous Mode",
        prompt: "\
Introduce autonomous programming concepts:
- What is autonomous mode vs teleop
- Using sensors for navigation
- Basic autonomous strategies
- Programming simple autonomous routines
- Testing and debugging autonomous code
Keep it accessible for beginners who know basic programming.",
    },
    TopicPrompt {
        id: "advanced_design",
        title: "Advanced Design",
        prompt: "\
Discuss advanced robot design principles:
- CAD and prototyping
- Weight distribution and center of gravity
- Mechanism optimization
- Iterative design process
- Learning from other teams
Focus on practical design thinking.",
    },
];

/// Returns the ordered topic list for a level.
pub fn topics_for(level: Level) -> &'static [TopicPrompt] {
    match level {
        Level::Beginner => &BEGINNER_TOPICS,
        Level::Intermediate => &INTERMEDIATE_TOPICS,
        Level::Advanced => &ADVANCED_TOPICS,
    }
}

/// Looks up a topic by id across all levels.
pub fn find_topic(topic_id: &str) -> Option<&'static TopicPrompt> {
    Level::ALL
        .iter()
        .flat_map(|level| topics_for(*level))
        .find(|t| t.id == topic_id)
}

/// Returns the system prompt for a topic id, or [`DEFAULT_SYSTEM_PROMPT`]
/// when the id is unknown.
pub fn topic_prompt(topic_id: &str) -> &'static str {
    find_topic(topic_id)
        .map(|t| t.prompt)
        .unwrap_or(DEFAULT_SYSTEM_PROMPT)
}

/// Returns the level a topic belongs to. Unknown ids map to
/// [`Level::Beginner`]; the caller always gets a valid "back" target.
pub fn level_of(topic_id: &str) -> Level {
    for level in Level::ALL {
        if topics_for(level).iter().any(|t| t.id == topic_id) {
            return level;
        }
    }
    Level::Beginner
}
