//! Media tagger adapters

mod ffmpeg;

pub use ffmpeg::FfmpegTagger;
