#[cfg(test)]
#[path = "slot_test.rs"]
mod tests;

use strum::EnumIter;

use super::EncodedAsset;
use super::Payload;
use super::Preview;

/// The three fixed image roles. Declaration order is the order payloads are
/// sent to the model in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum SlotRole {
    #[strum(to_string = "reference")]
    Reference,
    #[strum(to_string = "candidateA")]
    CandidateA,
    #[strum(to_string = "candidateB")]
    CandidateB,
}

impl SlotRole {
    pub fn index(&self) -> usize {
        match self {
            SlotRole::Reference => return 0,
            SlotRole::CandidateA => return 1,
            SlotRole::CandidateB => return 2,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            SlotRole::Reference => return "Reference (Real)",
            SlotRole::CandidateA => return "Image A",
            SlotRole::CandidateB => return "Image B",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ImageSlot {
    asset: Option<EncodedAsset>,
}

impl ImageSlot {
    pub fn is_filled(&self) -> bool {
        return self.asset.is_some();
    }

    /// Replaces whatever the slot held before. The previous asset is dropped
    /// here, so nothing of it can reach a later run.
    pub fn assign(&mut self, asset: EncodedAsset) {
        self.asset = Some(asset);
    }

    pub fn clear(&mut self) {
        self.asset = None;
    }

    pub fn payload(&self) -> Option<&Payload> {
        return self.asset.as_ref().map(|asset| return &asset.payload);
    }

    pub fn preview(&self) -> Option<&Preview> {
        return self.asset.as_ref().map(|asset| return &asset.preview);
    }
}
