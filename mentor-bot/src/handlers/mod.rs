//! Handler implementations: commands, free-text conversation, learning-path
//! callbacks. All methods hang off [`Dispatcher`].

mod chat;
mod commands;
mod dispatcher;
mod learning;

pub use dispatcher::{
    Dispatcher, CB_BACK_TO_LEVELS, CB_LEVEL_PREFIX, CB_TOPIC_PREFIX, LESSON_THINKING_MESSAGE,
    THINKING_MESSAGE,
};
