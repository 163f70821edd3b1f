//! create-bundle integration tests using the real pax binary

mod common;

use common::{TestWorkspace, pom};
use predicates::prelude::*;

fn root_project(workspace: &TestWorkspace) {
    workspace.write_file(
        "project/pom.xml",
        &pom("org.example", "app", "pom", "  <modules>\n  </modules>\n"),
    );
}

#[test]
fn test_bundle_added_to_project() {
    let workspace = TestWorkspace::new();
    root_project(&workspace);

    workspace
        .pax()
        .args([
            "create-bundle",
            "org.example.api",
            "--name",
            "api",
            "--dir",
            "project",
            "--junit",
            "4.13",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bundle"))
        .stdout(predicate::str::contains("org.example.app:api:1.0-SNAPSHOT"))
        .stdout(predicate::str::contains("org.example.app.api"));

    let bundle = workspace.read_file("project/api/pom.xml");
    assert!(bundle.contains("<packaging>bundle</packaging>"));
    assert!(bundle.contains("<relativePath>../pom.xml</relativePath>"));
    assert!(bundle.contains("<artifactId>osgi_R4_core</artifactId>"));
    assert!(bundle.contains("<artifactId>osgi_R4_compendium</artifactId>"));
    assert!(bundle.contains("<artifactId>junit</artifactId>"));
    assert!(bundle.contains("<bundle.symbolicName>org.example.app.api</bundle.symbolicName>"));

    let root = workspace.read_file("project/pom.xml");
    assert!(root.contains("<module>api</module>"));
}

#[test]
fn test_created_bundle_is_provisioned() {
    let workspace = TestWorkspace::new();
    root_project(&workspace);

    workspace
        .pax()
        .args(["create-bundle", "org.example.api", "--name", "api", "--dir", "project"])
        .assert()
        .success();

    // the new module is a bundle project but nothing has been built yet
    workspace
        .pax()
        .args(["provision", "--dir", "project", "--no-deploy"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping missing bundle"))
        .stderr(predicate::str::contains("api"));
}

#[test]
fn test_duplicate_module_is_rejected() {
    let workspace = TestWorkspace::new();
    root_project(&workspace);
    let args = ["create-bundle", "org.example.api", "--name", "api", "--dir", "project"];

    workspace.pax().args(args).assert().success();
    workspace
        .pax()
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Element already exists"));

    workspace.pax().args(args).arg("--overwrite").assert().success();
    let root = workspace.read_file("project/pom.xml");
    assert_eq!(root.matches("<module>api</module>").count(), 1);
}

#[test]
fn test_standalone_bundle_needs_settings_descriptors() {
    let workspace = TestWorkspace::new();
    workspace.write_file("standalone/.keep", "");

    workspace
        .pax()
        .args(["create-bundle", "org.example.tool", "--dir", "standalone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to find settings POM"));

    assert!(!workspace.file_exists("standalone/org.example.tool"));
}

#[test]
fn test_standalone_bundle_with_settings_descriptors() {
    let workspace = TestWorkspace::new();
    workspace.write_file("standalone/.keep", "");
    workspace.write_file(
        "templates/poms/pom.xml",
        &pom(
            "org.example.build",
            "plugins",
            "pom",
            "  <build>\n    <pluginManagement>\n      <plugins>\n        <plugin>\n          \
             <groupId>org.ops4j</groupId>\n          <artifactId>maven-pax-plugin</artifactId>\n        \
             </plugin>\n      </plugins>\n    </pluginManagement>\n  </build>\n",
        ),
    );
    workspace.write_file(
        "templates/poms/compiled/pom.xml",
        &pom(
            "org.example.build",
            "compiled",
            "pom",
            "  <build>\n    <plugins>\n      <plugin>\n        <groupId>org.apache.felix</groupId>\n        \
             <artifactId>maven-bundle-plugin</artifactId>\n      </plugin>\n    </plugins>\n  </build>\n",
        ),
    );

    workspace
        .pax()
        .args([
            "create-bundle",
            "org.example.tool",
            "--dir",
            "standalone",
            "--settings-poms",
            "templates",
            "--plugin-version",
            "1.4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("standalone"));

    let bundle = workspace.read_file("standalone/org.example.tool/pom.xml");
    assert!(!bundle.contains("<parent>"));
    assert!(bundle.contains("<version>1.4</version>"));
    assert!(bundle.contains("<artifactId>maven-bundle-plugin</artifactId>"));
    assert!(bundle.contains("<id>ops4j-snapshots</id>"));
    assert!(bundle.contains("<scope>provided</scope>"));
    assert!(bundle.contains("<optional>true</optional>"));
}

#[test]
fn test_spring_bundle() {
    let workspace = TestWorkspace::new();
    root_project(&workspace);

    workspace
        .pax()
        .args([
            "create-bundle",
            "org.example.beans",
            "--name",
            "beans",
            "--dir",
            "project",
            "--spring",
            "2.5",
        ])
        .assert()
        .success();

    let bundle = workspace.read_file("project/beans/pom.xml");
    assert!(bundle.contains("<id>spring-milestones</id>"));
    assert!(bundle.contains("<artifactId>spring-context</artifactId>"));
    assert!(!bundle.contains("<artifactId>spring-test</artifactId>"));
}

#[test]
fn test_removed_bundle_leaves_project() {
    let workspace = TestWorkspace::new();
    root_project(&workspace);

    workspace
        .pax()
        .args(["create-bundle", "org.example.api", "--name", "api", "--dir", "project"])
        .assert()
        .success();
    workspace
        .pax()
        .args(["remove-bundle", "api", "--dir", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed bundle"))
        .stdout(predicate::str::contains("org.example.app:api:1.0-SNAPSHOT"));

    let root = workspace.read_file("project/pom.xml");
    assert!(!root.contains("<module>api</module>"));
    assert!(workspace.file_exists("project/api/pom.xml"));

    workspace
        .pax()
        .args(["remove-bundle", "api", "--dir", "project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a module"));
}
