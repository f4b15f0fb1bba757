//! Assorted constants & hard-coded configuration
use crossterm::style::Color;
use std::time::Duration;

/// Number of interior columns on the board
pub(crate) const WIDTH: i16 = 15;

/// Number of interior rows on the board
pub(crate) const HEIGHT: i16 = 15;

/// Snake movements per second
pub(crate) const TICKS_PER_SECOND: u64 = 5;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(1000 / TICKS_PER_SECOND);

/// How long the input thread waits for a key before checking whether the
/// session has ended
pub(crate) const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Red component of every snake segment
pub(crate) const SNAKE_RED: u8 = 13;

/// Green component of the snake's head
pub(crate) const GREEN_BASELINE: u8 = 188;

/// Blue component of the snake's head
pub(crate) const BLUE_BASELINE: u8 = 121;

/// Total amount by which the green & blue components are darkened between
/// the head and the (virtual) cell past the tail
pub(crate) const GRADIENT_RANGE: usize = 88;

/// Background color of the border ring
pub(crate) const BORDER_COLOR: Color = Color::DarkBlue;

/// Background color of the fruit
pub(crate) const FRUIT_COLOR: Color = Color::DarkRed;

/// Every cell is drawn this many columns wide so that it looks square
pub(crate) const CELL_GLYPH: &str = "  ";

/// Environment variable naming an alternative configuration file
pub(crate) const CONFIG_ENV_VAR: &str = "TTYSNAKE_CONFIG";

/// Environment variable holding a `tracing` filter directive
pub(crate) const LOG_ENV_VAR: &str = "TTYSNAKE_LOG";
