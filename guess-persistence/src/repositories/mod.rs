pub mod game_repository;
pub mod leaderboard_repository;
pub mod puzzle_repository;
pub mod stats_repository;

pub use game_repository::GameRepository;
pub use leaderboard_repository::LeaderboardRepository;
pub use puzzle_repository::PuzzleRepository;
pub use stats_repository::StatsRepository;
