//! The demo menu tree.
//!
//! ```text
//! Main Menu
//! ├── Developer
//! │   ├── Debug Logs
//! │   │   ├── Backend logs
//! │   │   └── Frontend logs
//! │   └── System Info
//! ├── Settings Group
//! │   └── Account Settings
//! ├── Login
//! ├── Admin Panel   (requires Login)
//! └── Crash Test    (panics; recovered)
//! ```

use cmdmenu::middleware::{self, Logger, Middleware, Recover};
use cmdmenu::{Action, MenuConfig, MenuError, Router, Streams};
use tracing::info;

/// Stored in the context by "Login".
struct Session {
    user: String,
}

/// Builds the demo menu on `streams`.
pub fn build(config: MenuConfig, streams: Streams) -> Result<Router, MenuError> {
    let mut router = Router::with_config("Main Menu", config);
    router
        .set_streams(streams)
        .add_middleware(Logger)
        .add_middleware(Recover)
        .add_middleware(access_log());

    let developer = router.group("Developer", [])?;
    developer.group(
        "Debug Logs",
        [
            say("Backend logs", "backend logs here."),
            say("Frontend logs", "frontend logs here."),
        ],
    )?;
    developer.add_action(say("System Info", "OS: Linux\nVersion: 1.0.0"))?;

    router.group(
        "Settings Group",
        [say(
            "Account Settings",
            "Change your username/email/password here.",
        )],
    )?;

    router.add_actions([
        Action::new("Login", |ctx| {
            ctx.extensions.insert(Session {
                user: "admin".to_string(),
            });
            println!("You are now logged in!");
            Ok(())
        }),
        say("Admin Panel", "Welcome to the admin panel.").with_middleware(admin_check()),
        Action::new("Crash Test", |_ctx| panic!("Something went wrong!")),
    ])?;

    Ok(router)
}

fn say(name: &str, text: &'static str) -> Action {
    Action::new(name, move |_ctx| {
        println!("{text}");
        Ok(())
    })
}

fn access_log() -> impl Middleware {
    middleware::from_fn(|ctx, next| {
        info!("global: logging access");
        println!("[Middleware] Global: Logging access");
        next.run(ctx)
    })
}

fn admin_check() -> impl Middleware {
    middleware::from_fn(|ctx, next| {
        let Some(session) = ctx.extensions.get::<Session>() else {
            anyhow::bail!("admin check failed: log in first");
        };
        println!("[Middleware] Handler: Admin check passed for {}", session.user);
        next.run(ctx)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdmenu::MenuContext;

    fn run(script: &str) -> String {
        let (streams, output) = Streams::scripted(script);
        let router = build(MenuConfig::default(), streams).unwrap();
        router.run(&mut MenuContext::new());
        output.contents()
    }

    #[test]
    fn test_main_menu_lists_options() {
        let text = run("0\n");
        for row in [
            "| 1 | Developer      |",
            "| 2 | Settings Group |",
            "| 3 | Login          |",
            "| 4 | Admin Panel    |",
            "| 5 | Crash Test     |",
            "| 0 | Exit           |",
        ] {
            assert!(text.contains(row), "missing {row:?} in:\n{text}");
        }
    }

    #[test]
    fn test_developer_submenu_order() {
        let text = run("1\n0\n0\n");
        assert!(text.contains("| 1 | Debug Logs  |"));
        assert!(text.contains("| 2 | System Info |"));
        assert!(text.contains("| 0 | <-Back      |"));
    }

    #[test]
    fn test_admin_requires_login() {
        let text = run("4\n3\n4\n0\n");
        assert_eq!(
            text.matches("error: Admin Panel: admin check failed: log in first")
                .count(),
            1
        );
    }

    #[test]
    fn test_crash_is_recovered() {
        let text = run("5\n0\n");
        assert!(text.contains("error: Crash Test: panic: Something went wrong!"));
        assert!(text.ends_with("Enter option number: "));
    }

    #[test]
    fn test_path_shown_in_nested_menu() {
        let config = MenuConfig {
            show_path: true,
            ..MenuConfig::default()
        };
        let (streams, output) = Streams::scripted("1\n1\n0\n0\n0\n");
        build(config, streams)
            .unwrap()
            .run(&mut MenuContext::new());

        assert!(output
            .contents()
            .contains("> Main Menu > Developer > Debug Logs \n"));
    }
}
