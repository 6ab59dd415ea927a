use crate::chain::ChainSource;

/// How far behind the chain tip the search is allowed to look.
pub const SEARCH_WINDOW: u64 = 5000;

/// Smallest height within the recent window whose timestamp is >= `target`.
pub async fn resolve_height<C: ChainSource>(chain: &C, target: u64) -> crate::Result<u64> {
    let latest = chain.latest_height().await?;
    resolve_height_within(chain, target, latest).await
}

/// Lower-bound binary search over `[latest - SEARCH_WINDOW, latest]`.
///
/// Precondition: block timestamps are non-decreasing with height. If the
/// true answer predates the window, the returned height is the window start
/// and does not satisfy the lower-bound property; callers accept this as a
/// scope limitation. A block with no retrievable timestamp is an error, not
/// a truncated answer.
pub async fn resolve_height_within<C: ChainSource>(
    chain: &C,
    target: u64,
    latest: u64,
) -> crate::Result<u64> {
    let mut low = latest.saturating_sub(SEARCH_WINDOW);
    let mut high = latest;

    while low <= high {
        let mid = low + (high - low) / 2;
        let timestamp = chain
            .block_timestamp(mid)
            .await?
            .ok_or(crate::Error::BlockTimestampMissing(mid))?;

        if timestamp < target {
            low = mid + 1;
        } else if mid == 0 {
            return Ok(0);
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::scripted::ScriptedChain;

    const GENESIS_TS: u64 = 1_700_000_000;
    const BLOCK_TIME: u64 = 12;

    fn regular(height: u64) -> Option<u64> {
        Some(GENESIS_TS + height * BLOCK_TIME)
    }

    #[tokio::test]
    async fn test_exact_timestamp_resolves_to_its_block() {
        let chain = ScriptedChain::new(100_000, regular);

        let height = resolve_height(&chain, regular(99_500).unwrap())
            .await
            .unwrap();
        assert_eq!(height, 99_500);
    }

    #[tokio::test]
    async fn test_between_blocks_resolves_to_next_block() {
        let chain = ScriptedChain::new(100_000, regular);

        let height = resolve_height(&chain, regular(99_500).unwrap() + 1)
            .await
            .unwrap();
        assert_eq!(height, 99_501);
    }

    #[tokio::test]
    async fn test_lower_bound_property_across_window() {
        let chain = ScriptedChain::new(100_000, regular);
        let window_start = 100_000 - SEARCH_WINDOW;

        for target in [
            regular(window_start).unwrap(),
            regular(window_start + 1).unwrap() - 5,
            regular(97_123).unwrap(),
            regular(97_123).unwrap() + BLOCK_TIME - 1,
            regular(100_000).unwrap(),
        ] {
            let height = resolve_height(&chain, target).await.unwrap();
            assert!(regular(height).unwrap() >= target);
            assert!(height == window_start || regular(height - 1).unwrap() < target);
        }
    }

    #[tokio::test]
    async fn test_short_chain_clamps_window_to_genesis() {
        let chain = ScriptedChain::new(100, regular);

        // Before genesis, everything satisfies the bound.
        let height = resolve_height(&chain, GENESIS_TS - 1).await.unwrap();
        assert_eq!(height, 0);

        let height = resolve_height(&chain, regular(70).unwrap()).await.unwrap();
        assert_eq!(height, 70);
    }

    #[tokio::test]
    async fn test_target_past_tip_resolves_past_tip() {
        let chain = ScriptedChain::new(100, regular);

        let height = resolve_height(&chain, regular(100).unwrap() + 1)
            .await
            .unwrap();
        assert_eq!(height, 101);
    }

    #[tokio::test]
    async fn test_missing_timestamp_is_an_error() {
        // First probe of [5000, 10000] lands on 7500.
        fn holed(height: u64) -> Option<u64> {
            if height == 7500 {
                None
            } else {
                regular(height)
            }
        }
        let chain = ScriptedChain::new(10_000, holed);

        let err = resolve_height(&chain, regular(9_000).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::BlockTimestampMissing(7500)));
    }
}
