//! `restaurants` / `hotels` command handler.
//!
//! Resolves the origin from `--zip` or `--lat/--lon`, runs one search
//! through a [`SearchSession`], and prints the committed snapshot.

use nearby_core::{AppConfig, Coordinate};
use nearby_places::{
    resolve_from_device, resolve_from_postcode, CategoryKind, CommitResult, FixedLocation,
    PlacesClient, ResolvedOrigin, SearchRequest, SearchSession,
};

use crate::output::{print_json, print_table};
use crate::SearchArgs;

/// Run a place search for `kind` and print the results.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the coordinate or zip
/// code is invalid or unknown, or the provider request fails.
pub(crate) async fn run_search_command(
    config: &AppConfig,
    kind: CategoryKind,
    args: &SearchArgs,
    json: bool,
) -> anyhow::Result<()> {
    let client = PlacesClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build places client: {e}"))?;

    let origin = resolve_origin(&client, args).await?;

    let mut request = SearchRequest::from_config(origin, kind, config);
    if let Some(radius_km) = args.radius_km {
        request.radius_km = radius_km;
    }
    if let Some(limit) = args.limit {
        request.limit = limit;
    }

    let session = SearchSession::new();
    let snapshot = match session.search(&client, request).await? {
        CommitResult::Applied(snapshot) => snapshot,
        CommitResult::Stale { ticket, latest } => {
            anyhow::bail!("search {ticket} was superseded by search {latest}")
        }
    };

    if json {
        print_json(&snapshot)?;
    } else {
        print_table(&snapshot);
    }
    Ok(())
}

async fn resolve_origin(
    client: &PlacesClient,
    args: &SearchArgs,
) -> anyhow::Result<ResolvedOrigin> {
    if let Some(zip) = args.zip.as_deref() {
        return resolve_from_postcode(client, zip).await?.ok_or_else(|| {
            anyhow::anyhow!(
                "could not find the location for zip code '{}'; please try another one",
                zip.trim()
            )
        });
    }

    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => {
            let here = Coordinate::new(lat, lon)?;
            Ok(resolve_from_device(&FixedLocation(here), client).await?)
        }
        _ => anyhow::bail!("either --zip or both --lat and --lon are required"),
    }
}
