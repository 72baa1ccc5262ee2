use std::path::PathBuf;

use valit_core::SolverConfig;
use valit_mdp::{MdpSimulator, compile_yaml};

fn main() {
    let mut args = std::env::args().skip(1);
    let model_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/valit-mdp/examples/health.mdp.yaml"));
    let config = match args.next() {
        Some(path) => SolverConfig::from_yaml_path(path).expect("failed to load solver config"),
        None => SolverConfig::new(0.8, 1000),
    };

    let mdp = compile_yaml(&model_path).expect("failed to compile MDP YAML");
    let solution = mdp.solve(&config).expect("value iteration failed");

    for (state, action, value) in solution.iter() {
        println!("{state:>10}  {action:<10} {value:.9}");
    }
    println!(
        "sweeps={} final_max_delta={:e}",
        solution.metrics().sweeps_completed,
        solution.metrics().final_max_delta
    );

    let policy: Vec<usize> = mdp
        .state_ids()
        .iter()
        .map(|state| {
            let action = solution.action_for(state).expect("every state has an action");
            mdp.action_index(action).expect("policy action is declared")
        })
        .collect();

    let start = mdp.state_key(&mdp.state_ids()[0]).expect("first state exists");
    let mut simulator = MdpSimulator::new(mdp, 12345);
    let episodes = 1000;
    let total: f64 = (0..episodes)
        .map(|_| simulator.episode_return(start, 100, config.discount, |s| policy[s.index()]))
        .sum();
    println!("simulated_return={:.6}", total / episodes as f64);
}
