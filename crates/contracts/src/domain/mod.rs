pub mod a001_translation_record;
pub mod a002_translation_sound_record;
pub mod common;
