pub mod difficulty;
pub mod evaluator;
pub mod game;
pub mod generator;
pub mod letter_classifier;
pub mod progress;
pub mod view;
pub mod word_loader;
