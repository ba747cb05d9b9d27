//! Email notification: find the athlete's newest generated plan (and its
//! rendered PDF), build an HTML summary, and deliver it through SendGrid.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context as _;

use crate::error::{PlanpressError, PlanpressResult};
use crate::intake::Intake;

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Clone, Debug)]
pub struct NotifyConfig {
    pub plans_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Build everything but do not call the delivery API.
    pub dry_run: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            plans_dir: PathBuf::from("plans"),
            output_dir: PathBuf::from("output"),
            dry_run: false,
        }
    }
}

/// Outcome of a notification attempt. Missing configuration or missing files
/// skip delivery rather than fail it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Skipped(String),
}

/// Newest `{prefix}*-generated-*.json` in the plans directory, by
/// modification time.
pub fn find_generated_plan(
    plans_dir: &Path,
    intake: &Intake,
) -> PlanpressResult<Option<PathBuf>> {
    let Some(prefix) = intake.email_prefix() else {
        return Ok(None);
    };

    let pattern = format!("{}/{prefix}*-generated-*.json", plans_dir.display());
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in glob::glob(&pattern).context("compile plan discovery pattern")? {
        let Ok(path) = entry else { continue };
        let Ok(modified) = std::fs::metadata(&path).and_then(|m| m.modified()) else {
            continue;
        };
        if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }
    Ok(newest.map(|(_, path)| path))
}

/// PDF rendered from `plan_path`, if one exists next to it in the output dir.
pub fn find_generated_pdf(output_dir: &Path, plan_path: &Path) -> Option<PathBuf> {
    let stem = plan_path.file_stem()?;
    let candidate = output_dir.join(format!("{}.pdf", stem.to_string_lossy()));
    candidate.exists().then_some(candidate)
}

/// Browsable URL for a repository file, `repo_root`-relative.
pub fn github_file_url_with(
    server: &str,
    repo: &str,
    branch: &str,
    repo_root: &Path,
    file: &Path,
) -> String {
    let relative = file
        .strip_prefix(repo_root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| PathBuf::from(file.file_name().unwrap_or_default()));
    format!("{server}/{repo}/blob/{branch}/{}", relative.display())
}

pub fn github_file_url(repo_root: &Path, file: &Path) -> String {
    let server =
        std::env::var("GITHUB_SERVER_URL").unwrap_or_else(|_| "https://github.com".to_string());
    let repo =
        std::env::var("GITHUB_REPOSITORY").unwrap_or_else(|_| "planpress/planpress".to_string());
    let branch = std::env::var("GITHUB_REF_NAME").unwrap_or_else(|_| "main".to_string());
    github_file_url_with(&server, &repo, &branch, repo_root, file)
}

/// Subject and HTML body for the ready notification.
pub fn build_email(
    intake: &Intake,
    plan_url: Option<&str>,
    pdf_url: Option<&str>,
) -> (String, String) {
    let subject = "Your Marathon Training Plan is Ready!".to_string();

    let mut body = vec![
        "<h1>Your Training Plan is Ready!</h1>".to_string(),
        "<p>Great news! Your personalized marathon training plan has been generated.</p>"
            .to_string(),
    ];

    if !intake.target_time.is_empty() {
        body.push(format!(
            "<p><strong>Target Time:</strong> {}</p>",
            intake.target_time
        ));
    }

    body.push("<h2>Your Files</h2>".to_string());
    body.push("<ul>".to_string());
    if let Some(url) = pdf_url {
        body.push(format!(
            "<li><a href=\"{url}\">Download your PDF Training Plan</a></li>"
        ));
    }
    if let Some(url) = plan_url {
        body.push(format!(
            "<li><a href=\"{url}\">View detailed plan data (JSON)</a></li>"
        ));
    }
    body.push("</ul>".to_string());

    body.extend(
        [
            "<h2>What's Next?</h2>",
            "<ol>",
            "<li>Review your training plan and pace zones</li>",
            "<li>Mark your calendar with key workouts</li>",
            "<li>Set up your Garmin/watch with your HR zones</li>",
            "<li>Start Week 1 on Monday!</li>",
            "</ol>",
            "<p>Remember: Easy runs should feel <em>easy</em>. If you can't hold a conversation, slow down!</p>",
            "<hr>",
            "<p><em>This plan was automatically generated based on your intake form submission.</em></p>",
            "<p>Questions? Reply to this email or open an issue on GitHub.</p>",
        ]
        .map(str::to_string),
    );

    (subject, body.join("\n"))
}

pub struct SendgridClient {
    client: reqwest::blocking::Client,
    api_key: String,
    from_email: String,
}

impl SendgridClient {
    /// `None` when the delivery credentials are not configured; callers treat
    /// that as a skip, matching the pipeline's non-fatal delivery contract.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("SENDGRID_API_KEY").ok()?;
        let from_email = std::env::var("NOTIFICATION_FROM_EMAIL").ok()?;
        Some(Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            from_email,
        })
    }

    pub fn send(&self, to: &str, subject: &str, html: &str) -> PlanpressResult<()> {
        let body = serde_json::json!({
            "personalizations": [{"to": [{"email": to}]}],
            "from": {"email": self.from_email},
            "subject": subject,
            "content": [{"type": "text/html", "value": html}],
        });

        let response = self
            .client
            .post(SENDGRID_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("send notification request")?;

        let status = response.status();
        // SendGrid acknowledges accepted mail with 202.
        if status.as_u16() != 202 {
            let detail = response.text().unwrap_or_default();
            let excerpt: String = detail.chars().take(500).collect();
            return Err(PlanpressError::delivery(format!(
                "notification request returned {status}: {excerpt}"
            )));
        }
        tracing::info!(%to, "notification sent");
        Ok(())
    }
}

/// Discover generated files for the athlete and email them a summary.
#[tracing::instrument(skip_all, fields(email = %intake.email))]
pub fn notify(intake: &Intake, cfg: &NotifyConfig) -> PlanpressResult<DeliveryOutcome> {
    if intake.email.is_empty() {
        return Ok(DeliveryOutcome::Skipped(
            "no email address in intake".to_string(),
        ));
    }

    let plan_path = find_generated_plan(&cfg.plans_dir, intake)?;
    let pdf_path = plan_path
        .as_deref()
        .and_then(|p| find_generated_pdf(&cfg.output_dir, p));

    if plan_path.is_none() && pdf_path.is_none() {
        return Ok(DeliveryOutcome::Skipped(
            "no generated files found".to_string(),
        ));
    }

    let repo_root = std::env::current_dir().context("resolve repository root")?;
    let plan_url = plan_path.as_deref().map(|p| github_file_url(&repo_root, p));
    let pdf_url = pdf_path.as_deref().map(|p| github_file_url(&repo_root, p));

    let (subject, html) = build_email(intake, plan_url.as_deref(), pdf_url.as_deref());

    if cfg.dry_run {
        tracing::info!(%subject, "dry run, not sending");
        return Ok(DeliveryOutcome::Skipped("dry run".to_string()));
    }

    let Some(client) = SendgridClient::from_env() else {
        tracing::warn!("delivery credentials not configured, skipping email");
        return Ok(DeliveryOutcome::Skipped(
            "delivery credentials not configured".to_string(),
        ));
    };

    client.send(&intake.email, &subject, &html)?;
    Ok(DeliveryOutcome::Sent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake(email: &str) -> Intake {
        Intake {
            email: email.to_string(),
            ..Intake::default()
        }
    }

    #[test]
    fn discovery_picks_newest_matching_plan() {
        let dir = tempfile::tempdir().unwrap();
        let plans = dir.path();

        std::fs::write(plans.join("jane-moderate-generated-1.json"), "{}").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        std::fs::write(plans.join("jane-moderate-generated-2.json"), "{}").unwrap();
        // Other athletes and non-generated files are ignored.
        std::fs::write(plans.join("bob-moderate-generated-9.json"), "{}").unwrap();
        std::fs::write(plans.join("jane-notes.json"), "{}").unwrap();

        let found = find_generated_plan(plans, &intake("jane@example.com"))
            .unwrap()
            .expect("plan found");
        assert!(
            found
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("jane-moderate-generated-2")
        );
    }

    #[test]
    fn discovery_without_email_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            find_generated_plan(dir.path(), &Intake::default()).unwrap(),
            None
        );
    }

    #[test]
    fn pdf_lookup_matches_plan_stem() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path();
        std::fs::write(out.join("jane-generated-1.pdf"), "%PDF-").unwrap();

        let plan = Path::new("plans/jane-generated-1.json");
        assert!(find_generated_pdf(out, plan).is_some());
        assert!(find_generated_pdf(out, Path::new("plans/other.json")).is_none());
    }

    #[test]
    fn file_urls_are_repo_relative() {
        let url = github_file_url_with(
            "https://github.com",
            "planpress/planpress",
            "main",
            Path::new("/work/repo"),
            Path::new("/work/repo/output/plan.pdf"),
        );
        assert_eq!(
            url,
            "https://github.com/planpress/planpress/blob/main/output/plan.pdf"
        );

        // Outside the root only the file name survives.
        let url = github_file_url_with(
            "https://github.com",
            "planpress/planpress",
            "main",
            Path::new("/work/repo"),
            Path::new("/elsewhere/plan.pdf"),
        );
        assert!(url.ends_with("/blob/main/plan.pdf"));
    }

    #[test]
    fn email_body_lists_available_files() {
        let mut athlete = intake("jane@example.com");
        athlete.target_time = "3:45:00".to_string();

        let (subject, body) = build_email(
            &athlete,
            Some("https://example.com/plan.json"),
            Some("https://example.com/plan.pdf"),
        );
        assert!(subject.contains("Training Plan is Ready"));
        assert!(body.contains("3:45:00"));
        assert!(body.contains("plan.pdf"));
        assert!(body.contains("plan.json"));

        let (_, body) = build_email(&athlete, None, None);
        assert!(!body.contains("<li><a"));
    }

    #[test]
    fn notify_skips_when_nothing_was_generated() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = NotifyConfig {
            plans_dir: dir.path().join("plans"),
            output_dir: dir.path().join("output"),
            dry_run: false,
        };
        let outcome = notify(&intake("jane@example.com"), &cfg).unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Skipped(_)));
    }
}
