//! Email local-part cleanup.
//!
//! Mail providers commonly ignore dots, ignore everything after a `+` and
//! treat `_`/`-` variants as typos of the same mailbox. Folding those away
//! makes `john.doe+news@example.com` and `john_doe@example.com` collide.

const STRIPPED: [char; 3] = ['.', '_', '-'];

/// Clean the local part of an email-like identity.
///
/// Input without `@` is returned unchanged. The split happens on the last
/// `@`, so quoted local parts containing `@` keep their domain intact.
pub fn fold_email_local_part(identity: &str) -> String {
    let Some((local, domain)) = identity.rsplit_once('@') else {
        return identity.to_string();
    };

    let untagged = match local.split_once('+') {
        Some((head, _tag)) => head,
        None => local,
    };

    let mut out = String::with_capacity(identity.len());
    out.extend(untagged.chars().filter(|c| !STRIPPED.contains(c)));
    out.push('@');
    out.push_str(domain);
    out
}
