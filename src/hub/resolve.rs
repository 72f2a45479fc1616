use crate::error::LoaderError;

use super::HfRepoRef;

/// Parse a user-supplied dataset reference.
///
/// Accepts a canonical dataset name (`imdb`), a namespaced repo id
/// (`stanfordnlp/imdb`), or a dataset URL
/// (`https://huggingface.co/datasets/<namespace>/<dataset>[/tree/<revision>]`).
pub fn parse_dataset_ref(
    input: &str,
    revision: Option<&str>,
    config: Option<&str>,
) -> Result<HfRepoRef, LoaderError> {
    let (repo_id, revision_from_url) =
        if input.starts_with("http://") || input.starts_with("https://") {
            parse_repo_id_from_url(input)?
        } else {
            (validate_repo_id(input)?, None)
        };

    let merged_revision = match (revision, revision_from_url) {
        (Some(arg), Some(url_rev)) if arg != url_rev => {
            return Err(LoaderError::HubResolve {
                input: input.to_string(),
                message: format!(
                    "conflicting revisions: revision='{}' but URL encodes revision='{}'",
                    arg, url_rev
                ),
            });
        }
        (Some(arg), _) => Some(arg.to_string()),
        (None, Some(url_rev)) => Some(url_rev),
        (None, None) => None,
    };

    Ok(HfRepoRef {
        repo_id,
        revision: merged_revision,
        config: config.map(str::to_string),
    })
}

fn parse_repo_id_from_url(input: &str) -> Result<(String, Option<String>), LoaderError> {
    let url = url::Url::parse(input).map_err(|source| LoaderError::HubResolve {
        input: input.to_string(),
        message: format!("invalid URL: {source}"),
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| LoaderError::HubResolve {
            input: input.to_string(),
            message: "URL is missing a host".to_string(),
        })?
        .to_ascii_lowercase();

    if host != "huggingface.co" {
        return Err(LoaderError::HubResolve {
            input: input.to_string(),
            message: format!("expected host 'huggingface.co', found '{}'", host),
        });
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|iter| iter.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 || segments[0] != "datasets" {
        return Err(LoaderError::HubResolve {
            input: input.to_string(),
            message: "expected dataset URL like https://huggingface.co/datasets/<namespace>/<dataset>"
                .to_string(),
        });
    }

    // `datasets/<name>` for canonical datasets, `datasets/<ns>/<name>` otherwise.
    let (repo_id, rest) = match segments.get(2) {
        Some(&"tree") | None => (segments[1].to_string(), &segments[2..]),
        Some(dataset) => (format!("{}/{}", segments[1], dataset), &segments[3..]),
    };
    let repo_id = validate_repo_id(&repo_id)?;

    let revision = if rest.first() == Some(&"tree") {
        rest.get(1).map(|value| (*value).to_string())
    } else {
        None
    };

    Ok((repo_id, revision))
}

fn validate_repo_id(repo_id: &str) -> Result<String, LoaderError> {
    let trimmed = repo_id.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();

    let well_formed = matches!(parts.len(), 1 | 2)
        && parts
            .iter()
            .all(|part| !part.is_empty() && !part.contains(char::is_whitespace));

    if !well_formed {
        return Err(LoaderError::HubResolve {
            input: repo_id.to_string(),
            message: "expected dataset name or repo id in '<namespace>/<dataset>' form"
                .to_string(),
        });
    }

    Ok(trimmed.to_string())
}
