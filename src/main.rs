// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use hosttrust::config::PolicyConfig;
use hosttrust::policy::{
    host_policy, HostAttestation, HostDescriptor, HostEvidence, IntelHostTrustPolicyFactory,
    TrustReport,
};
use hosttrust::registry::VendorRegistry;
use hosttrust::store::{MemoBaselineStore, TrustAnchorSet};
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Parser)]
enum HostTrustCli {
    Appraise(AppraiseArgs),
    Compare(CompareArgs),
    Anchors(AnchorsArgs),
}

#[derive(Debug, clap::Args)]
struct CaArgs {
    /// Directory holding the Privacy CA certificates
    #[arg(long, default_value = ".")]
    cacerts_dir: String,

    /// JSON file listing the certificate authority sources
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Appraise the supplied host evidence against the trust policy \
    assembled for the host")]
struct AppraiseArgs {
    #[arg(short, long, default_value = "evidence.json")]
    evidence: String,

    #[arg(long, default_value = "host.json")]
    host: String,

    #[arg(short, long, default_value = "baseline.json")]
    baseline: String,

    #[command(flatten)]
    ca: CaArgs,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Compare the hypervisor measurements in the supplied host evidence \
    with the host's baselines, without checking the AIK certificate")]
struct CompareArgs {
    #[arg(short, long, default_value = "evidence.json")]
    evidence: String,

    #[arg(long, default_value = "host.json")]
    host: String,

    #[arg(short, long, default_value = "baseline.json")]
    baseline: String,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "List the fingerprints of the trusted AIK certificate authorities")]
struct AnchorsArgs {
    #[command(flatten)]
    ca: CaArgs,
}

fn main() {
    pretty_env_logger::init();

    match HostTrustCli::parse() {
        HostTrustCli::Appraise(args) => match appraise(&args) {
            Ok(a) => print_json(&a),
            Err(e) => eprintln!("appraisal failed: {e}"),
        },

        HostTrustCli::Compare(args) => match compare(&args) {
            Ok(r) => print_json(&r),
            Err(e) => eprintln!("comparison failed: {e}"),
        },

        HostTrustCli::Anchors(args) => match anchors(&args) {
            Ok(s) => {
                for fp in s.fingerprints() {
                    println!("{fp}");
                }
            }
            Err(e) => eprintln!("loading trust anchors failed: {e}"),
        },
    }
}

fn print_json<T: serde::Serialize>(v: &T) {
    match serde_json::to_string_pretty(v) {
        Ok(j) => println!("{j}"),
        Err(e) => eprintln!("serialising result failed: {e}"),
    }
}

fn load_config(args: &CaArgs) -> Result<PolicyConfig, Box<dyn Error>> {
    let dir = Path::new(&args.cacerts_dir);

    let config = match &args.config {
        Some(path) => PolicyConfig::load_json(&fs::read_to_string(path)?)?.resolve(dir),
        None => PolicyConfig::with_default_sources(dir),
    };

    Ok(config)
}

fn load_inputs(
    evidence: &str,
    host: &str,
    baseline: &str,
) -> Result<(HostEvidence, HostDescriptor, MemoBaselineStore), Box<dyn Error>> {
    let e = HostEvidence::load_json(&fs::read_to_string(evidence)?)?;

    let h = HostDescriptor::load_json(&fs::read_to_string(host)?)?;

    let mut rvs = MemoBaselineStore::new();
    rvs.load_json(&fs::read_to_string(baseline)?)?;

    Ok((e, h, rvs))
}

fn appraise(args: &AppraiseArgs) -> Result<HostAttestation, Box<dyn Error>> {
    let (e, h, rvs) = load_inputs(&args.evidence, &args.host, &args.baseline)?;

    let config = load_config(&args.ca)?;

    let mut registry = VendorRegistry::new();
    registry.register(
        "intel",
        Box::new(IntelHostTrustPolicyFactory::new(rvs, config.loader())),
    );

    let policy = host_policy(registry.for_host(&h)?, &h)?;

    let report = policy.appraise(&e);

    Ok(HostAttestation::new(&h, &e, report))
}

fn compare(args: &CompareArgs) -> Result<TrustReport, Box<dyn Error>> {
    let (e, h, rvs) = load_inputs(&args.evidence, &args.host, &args.baseline)?;

    // the comparison rules never look at the trust anchors
    let factory = IntelHostTrustPolicyFactory::with_trust_anchors(
        rvs,
        std::sync::Arc::new(TrustAnchorSet::new()),
    );

    let mut registry = VendorRegistry::new();
    registry.register("intel", Box::new(factory));

    let policy = registry
        .for_host(&h)?
        .comparison_rules_for_vmm(&h.vmm, &h)?;

    Ok(policy.appraise(&e))
}

fn anchors(args: &AnchorsArgs) -> Result<TrustAnchorSet, Box<dyn Error>> {
    let config = load_config(&args.ca)?;

    Ok(config.loader().load())
}
