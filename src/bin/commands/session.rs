use spotify_app_client::AppClient;

pub fn handle_login(app: &AppClient, callback: &str) -> Result<(), Box<dyn std::error::Error>> {
    app.complete_login(callback)?;
    println!("✅ Logged in");
    Ok(())
}

pub async fn handle_logout(app: &AppClient) {
    let outcome = app.logout().await;
    if outcome.was_authenticated {
        println!("👋 Logged out");
    } else {
        println!("ℹ️  No active session");
    }
    if let Some(url) = outcome.provider_logout_url {
        println!("To end the provider session as well, open {url}");
    }
}

pub fn handle_status(app: &AppClient) {
    if app.is_authenticated() {
        println!("✅ Session active");
    } else {
        println!("❌ Not logged in. Start at {}", app.login_url());
    }
}
