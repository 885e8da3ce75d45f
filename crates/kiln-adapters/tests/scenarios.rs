//! End-to-end module application against a real directory.

use std::{fs, path::Path, sync::Arc};

use kiln_adapters::{
    EmbeddedResources, FsProjectRepository, LocalFilesystem, SimpleRenderer,
    TomlBuildDescriptorRepository, generator,
};
use kiln_core::{
    application::{
        ApplicationError,
        modules::{LiquibaseDomainService, LiquibaseService, SpringBootDomainService},
        ports::{BuildDescriptorRepository, ProjectRepository},
        services::{BuildToolDomainService, LoggingDomainService, PropertiesDomainService},
    },
    domain::{
        Change, ConfigValue, DomainError, Project,
        defaults::{NEEDLE_LIQUIBASE, PRETTIER_DEFAULT_INDENT, SERVER_PORT},
    },
    error::KilnError,
};
use tempfile::TempDir;

const MASTER: &str = "src/main/resources/config/liquibase/master.xml";
const LOGBACK: &str = "src/main/resources/logback-spring.xml";
const LOGBACK_TEST: &str = "src/test/resources/logback.xml";
const PROPERTIES: &str = "src/main/resources/config/application.properties";
const PROPERTIES_TEST: &str = "src/test/resources/config/application.properties";

fn slugs(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn project(root: &Path) -> Project {
    Project::builder()
        .folder(root)
        .package_name("tech.jhipster.chips")
        .base_name("chips")
        .build()
        .unwrap()
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

fn local() -> kiln_core::application::GeneratorService {
    generator(
        Arc::new(LocalFilesystem::new()),
        Arc::new(EmbeddedResources::new()),
    )
    .unwrap()
}

fn liquibase_service() -> LiquibaseDomainService {
    let filesystem = Arc::new(LocalFilesystem::new());
    let repository: Arc<dyn ProjectRepository> = Arc::new(FsProjectRepository::new(
        filesystem.clone(),
        Arc::new(EmbeddedResources::new()),
        Arc::new(SimpleRenderer::new()),
    ));
    let descriptors: Arc<dyn BuildDescriptorRepository> =
        Arc::new(TomlBuildDescriptorRepository::new(filesystem));
    let build_tool = Arc::new(BuildToolDomainService::new(descriptors));
    let properties = Arc::new(PropertiesDomainService::new(repository.clone()));
    let spring_boot = Arc::new(SpringBootDomainService::new(
        repository.clone(),
        build_tool.clone(),
        properties,
    ));
    LiquibaseDomainService::new(
        repository.clone(),
        build_tool,
        spring_boot,
        Arc::new(LoggingDomainService::new(repository)),
    )
}

#[test]
fn spring_boot_project_is_generated() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let mut project = project(root);

    let report = local()
        .apply(
            &mut project,
            &slugs(&["init", "build-tool", "springboot", "springboot-mvc", "liquibase"]),
        )
        .unwrap();

    assert_eq!(report.applied.len(), 5);
    for path in [
        "README.md",
        ".gitignore",
        ".editorconfig",
        "kiln-build.toml",
        "src/main/java/tech/jhipster/chips/MainApp.java",
        "src/test/java/tech/jhipster/chips/IntegrationTest.java",
        "src/main/java/tech/jhipster/chips/technical/infrastructure/primary/exception/ExceptionTranslator.java",
        "src/main/java/tech/jhipster/chips/technical/infrastructure/primary/exception/FieldErrorDTO.java",
        "src/test/java/tech/jhipster/chips/technical/infrastructure/primary/exception/BadRequestAlertExceptionTest.java",
        "src/test/java/tech/jhipster/chips/technical/infrastructure/primary/exception/FieldErrorDTOTest.java",
        "src/test/java/tech/jhipster/chips/technical/infrastructure/primary/exception/HeaderUtilTest.java",
        "src/main/java/tech/jhipster/chips/technical/infrastructure/secondary/liquibase/LiquibaseConfiguration.java",
        MASTER,
        LOGBACK,
        LOGBACK_TEST,
        PROPERTIES,
        PROPERTIES_TEST,
    ] {
        assert!(root.join(path).is_file(), "missing {path}");
    }

    assert!(read(root, "README.md").starts_with("# JHipster Project"));
    assert!(read(root, ".editorconfig").contains("indent_size = 2"));
    assert!(
        read(root, "src/main/java/tech/jhipster/chips/MainApp.java")
            .starts_with("package tech.jhipster.chips;")
    );

    let properties = read(root, PROPERTIES);
    assert!(properties.contains("spring.application.name=chips"));
    assert!(properties.contains("server.port=8080"));
    assert!(read(root, PROPERTIES_TEST).contains("server.port=0"));

    let logback = read(root, LOGBACK);
    assert!(logback.contains("<logger name=\"liquibase\" level=\"WARN\" />"));
    assert!(logback.contains("<logger name=\"org.springframework.web\" level=\"WARN\" />"));
    assert_eq!(logback.matches("jhipster-needle-logback-add-log").count(), 1);

    let descriptor = read(root, "kiln-build.toml");
    assert!(descriptor.contains("artifact_id = \"liquibase-core\""));
    assert!(descriptor.contains("artifact_id = \"problem-spring-web\""));
}

#[test]
fn changelog_is_registered_in_master() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());
    local()
        .apply(&mut project, &slugs(&["build-tool", "springboot", "liquibase"]))
        .unwrap();

    let change = liquibase_service()
        .add_changelog_xml(&project, "module/added", "changelog.xml")
        .unwrap();

    assert_eq!(change, Change::Updated);
    let master = read(temp.path(), MASTER);
    assert!(master.contains(
        "  <include file=\"classpath:config/liquibase/module/added/changelog.xml\" relativeToChangelogFile=\"false\"/>\n  <!-- jhipster-needle-liquibase-add-changelog -->"
    ));
}

#[test]
fn changelog_respects_configured_indent() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());
    project.add_config(PRETTIER_DEFAULT_INDENT, ConfigValue::Integer(4));
    local()
        .apply(&mut project, &slugs(&["build-tool", "springboot", "liquibase"]))
        .unwrap();

    liquibase_service()
        .add_changelog_xml(&project, "module/added", "changelog.xml")
        .unwrap();

    let master = read(temp.path(), MASTER);
    assert!(master.contains(&format!("relativeToChangelogFile=\"false\"/>\n    {NEEDLE_LIQUIBASE}")));
}

#[test]
fn changelog_registered_again_after_another_is_unchanged() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());
    local()
        .apply(&mut project, &slugs(&["build-tool", "springboot", "liquibase"]))
        .unwrap();
    let service = liquibase_service();

    assert_eq!(
        service.add_changelog_xml(&project, "changelog", "a.xml").unwrap(),
        Change::Updated
    );
    assert_eq!(
        service.add_changelog_xml(&project, "changelog", "b.xml").unwrap(),
        Change::Updated
    );
    assert_eq!(
        service.add_changelog_xml(&project, "changelog", "a.xml").unwrap(),
        Change::Unchanged
    );

    let master = read(temp.path(), MASTER);
    assert_eq!(master.matches("changelog/a.xml").count(), 1);
    assert_eq!(master.matches("changelog/b.xml").count(), 1);
    assert_eq!(master.matches(NEEDLE_LIQUIBASE).count(), 1);
}

#[test]
fn missing_needle_leaves_file_untouched() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());
    local()
        .apply(&mut project, &slugs(&["build-tool", "springboot", "liquibase"]))
        .unwrap();
    let broken = "<databaseChangeLog>\n</databaseChangeLog>\n";
    fs::write(temp.path().join(MASTER), broken).unwrap();

    let err = liquibase_service()
        .add_changelog_xml(&project, "module/added", "changelog.xml")
        .unwrap_err();

    assert!(matches!(
        err,
        KilnError::Domain(DomainError::NeedleNotFound { .. })
    ));
    assert_eq!(read(temp.path(), MASTER), broken);
}

#[test]
fn mvc_applied_twice_changes_nothing_more() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let mut project = project(root);
    let generator = local();
    generator
        .apply(&mut project, &slugs(&["build-tool", "springboot", "springboot-mvc"]))
        .unwrap();
    let descriptor = read(root, "kiln-build.toml");
    let properties = read(root, PROPERTIES);
    let logback = read(root, LOGBACK);

    generator
        .apply(&mut project, &slugs(&["springboot-mvc"]))
        .unwrap();

    assert_eq!(read(root, "kiln-build.toml"), descriptor);
    assert_eq!(read(root, PROPERTIES), properties);
    assert_eq!(read(root, LOGBACK), logback);
    assert_eq!(properties.matches("server.port=").count(), 1);
    assert_eq!(descriptor.matches("problem-spring-web").count(), 1);
    assert_eq!(logback.matches("org.springframework.web").count(), 1);
}

/// Snapshot of the files a re-application could touch.
fn snapshot(root: &Path, paths: &[&str]) -> Vec<String> {
    paths.iter().map(|path| read(root, path)).collect()
}

#[test]
fn liquibase_applied_twice_changes_nothing_more() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let mut project = project(root);
    let generator = local();
    let watched = [MASTER, LOGBACK, LOGBACK_TEST, PROPERTIES, PROPERTIES_TEST, "kiln-build.toml"];

    generator
        .apply(&mut project, &slugs(&["build-tool", "springboot", "liquibase"]))
        .unwrap();
    let before = snapshot(root, &watched);

    generator.apply(&mut project, &slugs(&["liquibase"])).unwrap();

    assert_eq!(snapshot(root, &watched), before);
    for logback in [LOGBACK, LOGBACK_TEST] {
        let content = read(root, logback);
        assert_eq!(content.matches("<logger name=\"liquibase\"").count(), 1, "{logback}");
        assert_eq!(content.matches("LiquibaseSchemaResolver").count(), 1, "{logback}");
    }
}

#[test]
fn ehcache_java_config_applied_twice_changes_nothing_more() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let mut project = project(root);
    let generator = local();
    let watched = [LOGBACK, LOGBACK_TEST, PROPERTIES, PROPERTIES_TEST, "kiln-build.toml"];

    generator
        .apply(
            &mut project,
            &slugs(&["build-tool", "springboot", "ehcache-java-config"]),
        )
        .unwrap();
    let before = snapshot(root, &watched);

    generator
        .apply(&mut project, &slugs(&["ehcache-java-config"]))
        .unwrap();

    assert_eq!(snapshot(root, &watched), before);
    let properties = read(root, PROPERTIES);
    assert_eq!(
        properties
            .matches("application.cache.ehcache.max-entries=")
            .count(),
        1
    );
    assert_eq!(read(root, "kiln-build.toml").matches("\"ehcache\"").count(), 1);
}

#[test]
fn mistyped_server_port_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());
    project.add_config(SERVER_PORT, ConfigValue::String("eight".into()));

    local()
        .apply(&mut project, &slugs(&["build-tool", "springboot", "springboot-mvc"]))
        .unwrap();

    assert!(read(temp.path(), PROPERTIES).contains("server.port=8080"));
}

#[test]
fn configured_server_port_is_used() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());
    project.add_config(SERVER_PORT, ConfigValue::Integer(7419));

    local()
        .apply(&mut project, &slugs(&["build-tool", "springboot", "springboot-mvc"]))
        .unwrap();

    assert!(read(temp.path(), PROPERTIES).contains("server.port=7419"));
}

#[test]
fn build_dependent_module_needs_a_descriptor() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());

    let err = local()
        .apply(&mut project, &slugs(&["springboot"]))
        .unwrap_err();

    assert!(matches!(
        err,
        KilnError::Application(ApplicationError::MissingBuildDescriptor { .. })
    ));
}

#[test]
fn unknown_slug_applies_nothing() {
    let temp = TempDir::new().unwrap();
    let mut project = project(temp.path());

    let err = local()
        .apply(&mut project, &slugs(&["init", "no-such-module"]))
        .unwrap_err();

    assert!(matches!(
        err,
        KilnError::Application(ApplicationError::ModuleNotFound { .. })
    ));
    assert!(!temp.path().join("README.md").exists());
}

#[test]
fn ehcache_xml_configuration() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let mut project = project(root);

    local()
        .apply(&mut project, &slugs(&["build-tool", "springboot", "ehcache-xml-config", "sonar"]))
        .unwrap();

    assert!(root.join("src/main/resources/config/ehcache/ehcache.xml").is_file());
    assert!(
        read(root, PROPERTIES)
            .contains("spring.cache.jcache.config=classpath:config/ehcache/ehcache.xml")
    );
    assert!(read(root, "sonar-project.properties").contains("sonar.projectKey=chips"));
    assert!(root.join("src/main/docker/sonar.yml").is_file());
    let descriptor = read(root, "kiln-build.toml");
    assert!(descriptor.contains("jaxb-runtime"));
    assert!(descriptor.contains("sonar-maven-plugin.version"));
}
