use crate::commands::tags;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotebookStats {
    pub notes: usize,
    pub favorites: usize,
    pub folders: usize,
    pub tags: usize,
    pub trashed: usize,
    pub words: usize,
}

pub fn run(state: &AppState) -> NotebookStats {
    let active = state.notes.iter().filter(|n| !n.is_trashed());
    let (notes, favorites, words) = active.fold((0, 0, 0), |(count, favs, words), n| {
        (count + 1, favs + usize::from(n.is_favorite), words + n.word_count)
    });

    NotebookStats {
        notes,
        favorites,
        folders: state.folders.iter().filter(|f| !f.is_trashed()).count(),
        tags: tags::in_use(state).len(),
        trashed: state.notes.iter().filter(|n| n.is_trashed()).count()
            + state.folders.iter().filter(|f| f.is_trashed()).count(),
        words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StateFixture;
    use chrono::Utc;

    #[test]
    fn counts_active_and_trashed_items() {
        let mut fx = StateFixture::new()
            .with_note("A", "one two three", &["x"])
            .with_note("B", "four", &["x", "y"])
            .with_note("C", "ignored words here", &["z"])
            .with_folder("Work", None)
            .with_folder("Old", None);
        fx.state.notes[0].is_favorite = true;
        fx.state.notes[2].deleted_at = Some(Utc::now());
        fx.state.folders[1].deleted_at = Some(Utc::now());

        let stats = run(&fx.state);
        assert_eq!(
            stats,
            NotebookStats {
                notes: 2,
                favorites: 1,
                folders: 1,
                tags: 2,
                trashed: 2,
                words: 4,
            }
        );
    }
}
