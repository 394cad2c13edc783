//! Console stand-ins for the in-game notification channels.

use gate_notifier_core::NotificationSink;

/// Prints each channel's output on its own stdout line.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn send_chat_message(&mut self, text: &str) {
        println!("[chat] {text}");
    }

    fn show_toast(&mut self, text: &str) {
        println!("[toast] {text}");
    }

    fn play_sound(&mut self, effect_id: u32) {
        println!("[sound] <se.{effect_id}>");
    }
}
