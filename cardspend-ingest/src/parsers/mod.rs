pub mod card_export;
