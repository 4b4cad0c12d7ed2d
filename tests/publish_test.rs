// tests/publish_test.rs
//
// End-to-end tests for the publish workflow against temporary git
// repositories. Issue ids are always supplied so no network access happens.

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use tempfile::TempDir;

use image_publish::config::Config;
use image_publish::publish::{publish, PublishRequest};
use image_publish::ImagePublishError;

// Helper function to set up a temporary image repository for testing
fn setup_image_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");

    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    // Configure git user
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    // Create initial commit
    let readme = temp_dir.path().join("README.md");
    fs::write(&readme, b"Image repository\n").expect("Could not write initial file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("README.md"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    repo.commit(
        Some("HEAD"),
        &repo.signature().expect("Could not get sig"),
        &repo.signature().expect("Could not get sig"),
        "Initial commit",
        &tree,
        &[],
    )
    .expect("Could not create commit");

    temp_dir
}

// Helper to write a small PNG image for resizing
fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]));
    img.save(&path).expect("Could not write test image");
    path
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.behavior.non_interactive = true;
    config
}

fn request(source: PathBuf, repo: &TempDir) -> PublishRequest {
    PublishRequest {
        source,
        caption: Some("A chart".to_string()),
        max_width: "600".to_string(),
        issue: Some("2023-W40".to_string()),
        image_repo: repo.path().to_path_buf(),
        push: false,
    }
}

fn head_message(repo_path: &Path) -> String {
    let repo = Repository::open(repo_path).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    head.message().unwrap().to_string()
}

fn commit_count(repo_path: &Path) -> usize {
    let repo = Repository::open(repo_path).unwrap();
    let mut revwalk = repo.revwalk().unwrap();
    revwalk.push_head().unwrap();
    revwalk.count()
}

#[test]
fn test_publish_creates_copies_and_link() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "chart.png", 120, 80);

    let link = publish(&request(source, &repo), &test_config()).expect("publish should succeed");

    assert_eq!(
        link,
        "![A chart](https://raw.githubusercontent.com/rweekly/image/master/2023-W40/chart_600.png)"
    );

    let issue_dir = repo.path().join("2023-W40");
    assert!(issue_dir.join("chart.png").is_file());
    assert!(issue_dir.join("chart_600.png").is_file());

    // Original copied verbatim
    let original = fs::read(source_dir.path().join("chart.png")).unwrap();
    let copied = fs::read(issue_dir.join("chart.png")).unwrap();
    assert_eq!(original, copied);

    // Resized copy scaled proportionally to the target width
    let resized = image::open(issue_dir.join("chart_600.png")).unwrap();
    assert_eq!(resized.width(), 600);
    assert_eq!(resized.height(), 400);

    assert_eq!(head_message(repo.path()), "[auto] images for 2023-W40");
    assert_eq!(commit_count(repo.path()), 2);
}

#[test]
fn test_publish_commit_contains_both_files() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "plot.png", 100, 100);

    publish(&request(source, &repo), &test_config()).expect("publish should succeed");

    let git_repo = Repository::open(repo.path()).unwrap();
    let head = git_repo.head().unwrap().peel_to_commit().unwrap();
    let tree = head.tree().unwrap();
    let issue_entry = tree.get_name("2023-W40").expect("issue dir in tree");
    let issue_tree = git_repo.find_tree(issue_entry.id()).unwrap();
    assert!(issue_tree.get_name("plot.png").is_some());
    assert!(issue_tree.get_name("plot_600.png").is_some());
}

#[test]
fn test_publish_width_suffix_is_normalized() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "chart.png", 120, 80);

    let mut req = request(source, &repo);
    req.max_width = "600px".to_string();

    let link = publish(&req, &test_config()).expect("publish should succeed");

    // "600px" behaves exactly like "600"
    assert!(link.ends_with("/2023-W40/chart_600.png)"));
    assert!(repo.path().join("2023-W40/chart_600.png").is_file());
}

#[test]
fn test_publish_fails_if_original_exists() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "chart.png", 120, 80);

    let issue_dir = repo.path().join("2023-W40");
    fs::create_dir_all(&issue_dir).unwrap();
    fs::write(issue_dir.join("chart.png"), b"prior upload").unwrap();

    let err = publish(&request(source, &repo), &test_config())
        .expect_err("publish should refuse to overwrite");

    assert!(matches!(err, ImagePublishError::AlreadyExists(_)));

    // No resize happened and no commit was created
    assert!(!issue_dir.join("chart_600.png").exists());
    assert_eq!(commit_count(repo.path()), 1);

    // The prior upload was not touched
    assert_eq!(fs::read(issue_dir.join("chart.png")).unwrap(), b"prior upload");
}

#[test]
fn test_publish_fails_if_resized_exists() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "chart.png", 120, 80);

    let issue_dir = repo.path().join("2023-W40");
    fs::create_dir_all(&issue_dir).unwrap();
    fs::write(issue_dir.join("chart_600.png"), b"prior resized upload").unwrap();

    let err = publish(&request(source, &repo), &test_config())
        .expect_err("publish should refuse to overwrite");

    assert!(matches!(err, ImagePublishError::AlreadyExists(_)));

    // The original was copied before the failure; earlier side effects stay
    assert!(issue_dir.join("chart.png").is_file());
    assert_eq!(
        fs::read(issue_dir.join("chart_600.png")).unwrap(),
        b"prior resized upload"
    );
    assert_eq!(commit_count(repo.path()), 1);
}

#[test]
fn test_publish_missing_source_fails() {
    let repo = setup_image_repo();

    let req = request(PathBuf::from("/nonexistent/chart.png"), &repo);
    let err = publish(&req, &test_config()).expect_err("publish should fail");

    assert!(matches!(err, ImagePublishError::InvalidArgument(_)));
}

#[test]
fn test_publish_outside_git_repository_fails() {
    let plain_dir = TempDir::new().unwrap();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "chart.png", 120, 80);

    let req = PublishRequest {
        source,
        caption: Some("A chart".to_string()),
        max_width: "600".to_string(),
        issue: Some("2023-W40".to_string()),
        image_repo: plain_dir.path().to_path_buf(),
        push: false,
    };

    let err = publish(&req, &test_config()).expect_err("publish should fail");

    assert!(matches!(err, ImagePublishError::InvalidArgument(_)));
    // Fails before any side effect
    assert!(!plain_dir.path().join("2023-W40").exists());
}

#[test]
fn test_publish_invalid_width_fails_before_side_effects() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "chart.png", 120, 80);

    let mut req = request(source, &repo);
    req.max_width = "wide".to_string();

    let err = publish(&req, &test_config()).expect_err("publish should fail");

    assert!(matches!(err, ImagePublishError::InvalidArgument(_)));
    assert!(!repo.path().join("2023-W40").exists());
}

#[test]
fn test_publish_empty_caption_when_non_interactive() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();
    let source = write_test_image(source_dir.path(), "chart.png", 120, 80);

    let mut req = request(source, &repo);
    req.caption = None;

    let link = publish(&req, &test_config()).expect("publish should succeed");

    assert!(link.starts_with("![]("));
}

#[test]
fn test_publish_reuses_existing_issue_directory() {
    let repo = setup_image_repo();
    let source_dir = TempDir::new().unwrap();

    let first = write_test_image(source_dir.path(), "first.png", 120, 80);
    let second = write_test_image(source_dir.path(), "second.png", 90, 60);

    publish(&request(first, &repo), &test_config()).expect("first publish should succeed");
    publish(&request(second, &repo), &test_config()).expect("second publish should succeed");

    let issue_dir = repo.path().join("2023-W40");
    assert!(issue_dir.join("first.png").is_file());
    assert!(issue_dir.join("first_600.png").is_file());
    assert!(issue_dir.join("second.png").is_file());
    assert!(issue_dir.join("second_600.png").is_file());
    assert_eq!(commit_count(repo.path()), 3);
}
