impl<QS, IN> ReaderApp<QS, IN>
where
    QS: QuoteSource,
    IN: InputProvider,
{
    fn process_inputs(&mut self) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event),
                Ok(None) => break,
                Err(_) => {
                    warn!("input: provider error, dropping remaining events");
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::ToggleSession => {
                if self.is_running() {
                    self.stop_session();
                } else {
                    self.start_session();
                }
            }
            InputEvent::RaiseWpm => {
                let next = self.config.wpm.saturating_add(WPM_STEP).min(WPM_MAX);
                self.set_wpm(next);
            }
            InputEvent::LowerWpm => {
                let next = self.config.wpm.saturating_sub(WPM_STEP).max(WPM_MIN);
                self.set_wpm(next);
            }
            InputEvent::SubmitWpm(candidate) => {
                // Rejected entries fall back to the current value, but the
                // resolution is persisted either way.
                self.config.wpm = resolve_wpm(candidate, Some(self.config.wpm));
                self.settings_dirty = true;
                self.pending_redraw = true;
            }
        }
    }

    /// Rate changes take effect when the next quote starts; the word
    /// currently being paced keeps its spacing.
    fn set_wpm(&mut self, wpm: u16) {
        if wpm == self.config.wpm {
            return;
        }

        self.config.wpm = wpm;
        self.settings_dirty = true;
        self.pending_redraw = true;
    }
}
