use crate::{choose, Catalog, ConfigError, Item, RandomSource, RoundConfig};

pub fn draw_required_count(rng: &mut dyn RandomSource, config: &RoundConfig) -> usize {
    rng.uniform_int(1, config.target_cap().max(1))
}

/// `required` copies of `target` followed by decoys drawn with replacement.
/// Unshuffled; decoys never share the target's name.
pub fn build_selection_pool(
    rng: &mut dyn RandomSource,
    catalog: &Catalog,
    target: &Item,
    required: usize,
    slot_count: usize,
) -> Result<Vec<Item>, ConfigError> {
    let required = required.min(slot_count);
    let needed = slot_count - required;
    let decoys = catalog.decoys_for(&target.name);
    if needed > 0 && decoys.is_empty() {
        return Err(ConfigError::DecoysExhausted {
            target: target.name.clone(),
            needed,
        });
    }

    let mut pool = Vec::with_capacity(slot_count);
    pool.extend(std::iter::repeat(target).take(required).cloned());
    for _ in 0..needed {
        let decoy = choose(rng, &decoys).ok_or_else(|| ConfigError::DecoysExhausted {
            target: target.name.clone(),
            needed,
        })?;
        pool.push((*decoy).clone());
    }
    Ok(pool)
}
