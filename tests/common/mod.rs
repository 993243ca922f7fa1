use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Nothing listens on the discard port, so requests fail fast with a connection error.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Helper struct to run conecta with an isolated config directory
pub struct ConectaTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl ConectaTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let binary_path = if cfg!(debug_assertions) {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/conecta")
        } else {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/release/conecta")
        };

        let binary_path = if std::path::Path::new(binary_path).exists() {
            binary_path.to_string()
        } else {
            env!("CARGO_BIN_EXE_conecta").to_string()
        };

        ConectaTest {
            temp_dir,
            binary_path,
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("CONECTA_CONFIG_DIR", self.temp_dir.path())
            .env("CONECTA_API_BASE_URL", UNREACHABLE_API)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute conecta command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config file");
    }

    pub fn write_token(&self, token: &str) {
        fs::write(self.temp_dir.path().join("token"), token).expect("Failed to write token");
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    #[allow(dead_code)]
    pub fn read_file(&self, relative_path: &str) -> Option<String> {
        let path = self.temp_dir.path().join(relative_path);
        fs::read_to_string(path).ok()
    }
}
