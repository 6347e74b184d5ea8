//! Command helper methods for Test.

use super::Test;
use super::PASSPHRASE;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// A sealdir command pointed at this environment's root and rings.
    ///
    /// HOME and the config directory are isolated so no user config
    /// leaks in, and the passphrase comes from the environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sealdir").expect("failed to find sealdir binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SEALDIR_CONFIG");
        cmd.env_remove("SEALDIR_LOG");
        cmd.env("SEALDIR_PASSPHRASE", PASSPHRASE);
        cmd.arg("-s").arg(self.root());
        cmd.arg("--secret-ring").arg(self.secret_ring());
        cmd.arg("--public-ring").arg(self.public_ring());
        cmd
    }

    /// `sealdir -s <root> [-g pattern]`
    pub fn search(&self, pattern: Option<&str>) -> Output {
        let mut cmd = self.cmd();
        if let Some(pattern) = pattern {
            cmd.args(["-g", pattern]);
        }
        cmd.output().expect("failed to run sealdir")
    }

    /// `sealdir -s <root> -d`
    pub fn decrypt(&self) -> Output {
        self.cmd().arg("-d").output().expect("failed to run sealdir -d")
    }

    /// `sealdir -s <root> -e`
    pub fn encrypt(&self) -> Output {
        self.cmd().arg("-e").output().expect("failed to run sealdir -e")
    }
}
