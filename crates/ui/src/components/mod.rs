pub mod contact_card;
pub mod footer;
pub mod globe;
pub mod profile_card;
pub mod transcript;

pub use contact_card::ContactCardView;
pub use footer::Footer;
pub use globe::Globe;
pub use profile_card::ProfileCard;
pub use transcript::TranscriptView;
