pub mod party_players;
pub mod party_rooms;
pub mod party_rounds;
pub mod party_scores;

pub use party_players::Entity as PartyPlayers;
pub use party_players::Model as PartyPlayer;
pub use party_rooms::Entity as PartyRooms;
pub use party_rooms::Model as PartyRoom;
pub use party_rounds::Entity as PartyRounds;
pub use party_rounds::Model as PartyRound;
pub use party_scores::Entity as PartyScores;
pub use party_scores::Model as PartyScore;
