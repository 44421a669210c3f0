use std::fmt;

use serde::Serialize;

/// Emotion labels reported by the emotion recognition service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Emotion {
    /// Anger.
    Anger,
    /// Contempt.
    Contempt,
    /// Disgust.
    Disgust,
    /// Fear.
    Fear,
    /// Happiness.
    Happiness,
    /// Neutral expression.
    Neutral,
    /// Sadness.
    Sadness,
    /// Surprise.
    Surprise,
}

impl Emotion {
    /// Every label, in the order ties are resolved.
    pub const ALL: [Emotion; 8] = [
        Emotion::Anger,
        Emotion::Contempt,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happiness,
        Emotion::Neutral,
        Emotion::Sadness,
        Emotion::Surprise,
    ];

    /// Key of this emotion inside a reply's `scores` object.
    pub fn key(self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Contempt => "contempt",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happiness => "happiness",
            Emotion::Neutral => "neutral",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
        }
    }

    /// Candidate sticker emoji for a face showing this emotion.
    ///
    /// Never empty. Picking one of them is left to the caller.
    pub fn emojis(self) -> &'static [&'static str] {
        match self {
            Emotion::Anger => &["😡", "😠"],
            Emotion::Contempt => &["😤"],
            Emotion::Disgust => &["😷", "🤐"],
            Emotion::Fear => &["😱"],
            Emotion::Happiness => &["😝", "😀", "😃", "😄", "😆", "😊", "🙂", "☺️"],
            Emotion::Neutral => &["😶", "😐", "😑"],
            Emotion::Sadness => &["🙁", "😞", "😟", "😔", "😢", "😭"],
            Emotion::Surprise => &["😳", "😮", "😲"],
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Emotion::Anger => "Anger",
            Emotion::Contempt => "Contempt",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Happiness => "Happiness",
            Emotion::Neutral => "Neutral",
            Emotion::Sadness => "Sadness",
            Emotion::Surprise => "Surprise",
        };
        f.write_str(label)
    }
}

/// Bounding box of a detected face, in source image pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rectangle {
    /// X coordinate of the left edge.
    pub left: u32,
    /// Y coordinate of the top edge.
    pub top: u32,
    /// Width of the box.
    pub width: u32,
    /// Height of the box.
    pub height: u32,
}

impl Rectangle {
    /// Create a rectangle from its left/top corner and size.
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// The most probable emotion of one detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmotionResult {
    /// Where the face is.
    pub rect: Rectangle,
    /// Winning emotion for that face.
    pub emotion: Emotion,
}

/// Confidence per emotion, indexed in [`Emotion::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoreSet {
    scores: [f64; 8],
}

impl ScoreSet {
    pub(crate) fn new(scores: [f64; 8]) -> Self {
        Self { scores }
    }

    /// Arg-max over the scores.
    ///
    /// The running maximum starts at 0.0 and only moves on a strictly greater
    /// score, so the first label wins a tie and a set with no positive score
    /// has no winner.
    pub(crate) fn dominant(&self) -> Option<Emotion> {
        let mut best: Option<Emotion> = None;
        let mut maximum = 0.0;
        for (emotion, &score) in Emotion::ALL.iter().zip(self.scores.iter()) {
            if score > maximum {
                maximum = score;
                best = Some(*emotion);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(index: usize, value: f64) -> [f64; 8] {
        let mut scores = [0.0; 8];
        scores[index] = value;
        scores
    }

    #[test]
    fn unique_maximum_wins() {
        for (i, emotion) in Emotion::ALL.iter().enumerate() {
            let set = ScoreSet::new(with(i, 0.7));
            assert_eq!(set.dominant(), Some(*emotion));
        }
    }

    #[test]
    fn tie_resolves_to_first_label() {
        let set = ScoreSet::new([0.1, 0.0, 0.0, 0.4, 0.0, 0.4, 0.0, 0.1]);
        assert_eq!(set.dominant(), Some(Emotion::Fear));

        let set = ScoreSet::new([0.125; 8]);
        assert_eq!(set.dominant(), Some(Emotion::Anger));
    }

    #[test]
    fn all_zero_has_no_winner() {
        assert_eq!(ScoreSet::new([0.0; 8]).dominant(), None);
    }

    #[test]
    fn negative_scores_have_no_winner() {
        assert_eq!(ScoreSet::new([-0.5; 8]).dominant(), None);
    }

    #[test]
    fn nan_is_never_the_maximum() {
        let mut scores = with(6, 0.2);
        scores[0] = f64::NAN;
        assert_eq!(ScoreSet::new(scores).dominant(), Some(Emotion::Sadness));
    }

    #[test]
    fn keys_follow_label_order() {
        let keys: Vec<_> = Emotion::ALL.iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            [
                "anger",
                "contempt",
                "disgust",
                "fear",
                "happiness",
                "neutral",
                "sadness",
                "surprise"
            ]
        );
    }

    #[test]
    fn every_emotion_has_a_sticker() {
        for emotion in Emotion::ALL {
            assert!(!emotion.emojis().is_empty(), "{emotion} has no emoji");
        }
        assert_eq!(Emotion::Happiness.emojis().len(), 8);
    }

    #[test]
    fn display_is_capitalized() {
        assert_eq!(Emotion::Surprise.to_string(), "Surprise");
    }
}
