pub mod club;
pub mod game;
pub mod player;

pub use club::Club;
pub use game::{Game, GameStatus, StreamItem, Team, TeamPlayer};
pub use player::{ClubRef, Player};
