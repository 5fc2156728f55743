// Card Animation Streaming Module
// Emits count-up frames for each KPI card as Server-Sent Events.

use crate::animation::{AnimationConfig, CounterState};
use crate::metrics::MetricEntry;
use async_stream::stream;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tokio::time::sleep;

/// One animation frame of one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFrame {
    /// Card position, left to right
    pub card: usize,
    pub label: String,
    pub display: String,
}

/// Frames for every card, animated one card after another
pub struct CardStream {
    entries: Vec<MetricEntry>,
    config: AnimationConfig,
}

impl CardStream {
    pub fn new(entries: Vec<MetricEntry>, config: AnimationConfig) -> Self {
        Self { entries, config }
    }

    /// Yield frames in display order, sleeping one tick after each numeric
    /// frame. Text cards yield a single frame with no delay.
    pub fn into_frame_stream(self) -> Pin<Box<dyn Stream<Item = CardFrame> + Send>> {
        let entries = self.entries;
        let config = self.config;

        Box::pin(stream! {
            for (card, entry) in entries.into_iter().enumerate() {
                let mut state = CounterState::new(&entry.value, config.steps);
                let animated = state.is_animated();

                while let Some(display) = state.tick() {
                    yield CardFrame {
                        card,
                        label: entry.label.clone(),
                        display,
                    };

                    if animated && !config.tick.is_zero() {
                        sleep(config.tick).await;
                    }
                }
            }
        })
    }

    /// Frames as SSE text, terminated by a `done` event
    pub fn into_stream(self) -> Pin<Box<dyn Stream<Item = String> + Send>> {
        let cards = self.entries.len();
        let frames = self.into_frame_stream();

        Box::pin(stream! {
            let mut emitted = 0usize;
            for await frame in frames {
                emitted += 1;
                yield format_sse("frame", &frame);
            }
            tracing::debug!(cards, frames = emitted, "Card animation finished");
            yield "event: done\ndata: {}\n\n".to_string();
        })
    }
}

/// Format a payload as an SSE event
pub fn format_sse<T: Serialize>(event: &str, payload: &T) -> String {
    let data = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());
    format!("event: {}\ndata: {}\n\n", event, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricValue, TOP_RESEARCH_AREA, TOTAL_PUBLICATIONS};
    use futures::StreamExt;
    use std::time::Duration;

    fn entries() -> Vec<MetricEntry> {
        vec![
            MetricEntry::new(TOTAL_PUBLICATIONS, MetricValue::Integer(150)),
            MetricEntry::new(TOP_RESEARCH_AREA, MetricValue::Text("AI & IoT".to_string())),
            MetricEntry::new("Ratio", MetricValue::Float(17.5)),
        ]
    }

    #[tokio::test]
    async fn test_frames_in_card_order() {
        let frames: Vec<CardFrame> = CardStream::new(entries(), AnimationConfig::instant())
            .into_frame_stream()
            .collect()
            .await;

        let cards: Vec<usize> = frames.iter().map(|f| f.card).collect();
        assert!(cards.windows(2).all(|w| w[0] <= w[1]));

        // 150 / 50 = 3 per tick
        let first: Vec<&CardFrame> = frames.iter().filter(|f| f.card == 0).collect();
        assert_eq!(first.len(), 50);
        assert_eq!(first[0].display, "3");
        assert_eq!(first.last().unwrap().display, "150");

        let text: Vec<&CardFrame> = frames.iter().filter(|f| f.card == 1).collect();
        assert_eq!(text.len(), 1);
        assert_eq!(text[0].display, "AI & IoT");

        assert_eq!(frames.last().unwrap().display, "17.50");
    }

    #[tokio::test]
    async fn test_sse_output() {
        let events: Vec<String> = CardStream::new(entries(), AnimationConfig::instant())
            .into_stream()
            .collect()
            .await;

        assert!(events[0].starts_with("event: frame\ndata: "));
        assert!(events[0].ends_with("\n\n"));
        assert!(events[0].contains("\"card\":0"));
        assert_eq!(events.last().unwrap(), "event: done\ndata: {}\n\n");
    }

    #[tokio::test]
    async fn test_empty_entries() {
        let events: Vec<String> = CardStream::new(vec![], AnimationConfig::instant())
            .into_stream()
            .collect()
            .await;
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_tick_delay() {
        let config = AnimationConfig::new(20, 50);
        let entries = vec![MetricEntry::new("Count", MetricValue::Integer(5))];

        let start = std::time::Instant::now();
        let frames: Vec<CardFrame> = CardStream::new(entries, config)
            .into_frame_stream()
            .collect()
            .await;

        assert_eq!(frames.len(), 5);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn test_format_sse() {
        let frame = CardFrame {
            card: 2,
            label: "x".to_string(),
            display: "28.40".to_string(),
        };
        assert_eq!(
            format_sse("frame", &frame),
            "event: frame\ndata: {\"card\":2,\"label\":\"x\",\"display\":\"28.40\"}\n\n"
        );
    }
}
