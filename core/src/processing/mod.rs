pub mod ffprobe;
pub mod normalize;
pub mod startup_self_check;
