use crate::headers::AUTHORIZATION;
use crate::{Result, Transport};
use http_types::Method;

/// `DELETE /auth/logout`, sent with `identity` as an explicit bearer.
///
/// The session store has usually been cleared by the time this runs, so the
/// identity is passed in rather than read from the transport.
pub async fn logout(transport: &Transport, identity: &str) -> Result<()> {
    let bearer = format!("Bearer {identity}");
    transport
        .request(
            Method::Delete,
            "/auth/logout",
            None,
            &[(AUTHORIZATION, bearer.as_str())],
        )
        .await?;
    Ok(())
}
