impl<QS, IN> ReaderApp<QS, IN>
where
    QS: QuoteSource,
    IN: InputProvider,
{
    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        let wpm = self.config.wpm;

        match self.ui {
            UiState::Idle => f(Screen::Idle { wpm }),
            UiState::Errored => f(Screen::Errored {
                wpm,
                message: QUOTE_ERROR_TEXT,
            }),
            UiState::Fetching { .. } | UiState::Reading { .. } => match &self.shown {
                Some(shown) => {
                    let word_total = self.words.len().max(1);
                    f(Screen::Reading {
                        wpm,
                        word: FocusedWord::split(&shown.text),
                        word_index: shown.index.min(word_total - 1),
                        word_total,
                    })
                }
                None => f(Screen::Fetching { wpm }),
            },
        }
    }
}
