//! PCR 추적을 위한 도메인 모델.

mod index_state;
mod sample;

pub use index_state::*;
pub use sample::*;
