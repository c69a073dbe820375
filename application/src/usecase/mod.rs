mod transcribe;
mod translate;

pub use transcribe::{TranscribeUseCase, TranscribeUseCaseImpl};
pub use translate::{TranslateUseCase, TranslateUseCaseImpl};
