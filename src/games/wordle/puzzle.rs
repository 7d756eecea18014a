use tracing::{debug, trace, warn};

use super::{core::Word, error::StartError, source::WordSource};

pub const DEFAULT_MAX_DRAWS: usize = 100;

/// Draws answers from `source` until the dictionary vouches for one.
///
/// Gives up with [`StartError::NoCandidateWords`] after `max_draws` rejected
/// candidates, or straight away if the corpus has no word of `length`
/// letters. A failed lookup ends the search immediately.
#[tracing::instrument(skip(source))]
pub async fn draw_target<S>(source: &S, length: usize, max_draws: usize) -> Result<Word, StartError>
where
    S: WordSource,
{
    for draw in 1..=max_draws {
        let Some(candidate) = source.pick_candidate(length).await else {
            warn!("corpus has no words of this length");
            return Err(StartError::NoCandidateWords {
                length,
                draws: draw - 1,
            });
        };

        if candidate.len() != length {
            warn!(%candidate, "corpus returned a word of the wrong length");
            continue;
        }

        if source.exists(&candidate).await? {
            debug!(draw, "target word is ready");
            return Ok(candidate);
        }

        trace!(%candidate, draw, "candidate not in dictionary");
    }

    warn!("ran out of draws");

    Err(StartError::NoCandidateWords {
        length,
        draws: max_draws,
    })
}
