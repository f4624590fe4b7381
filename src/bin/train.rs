//! Command line tool to train, evaluate, and try out the IMDB sentiment classifier

use std::{path::Path, sync::Arc};

use anyhow::{anyhow, bail};
use burn::{
    config::Config as _,
    module::AutodiffModule,
    tensor::backend::{AutodiffBackend, Backend as BackendTrait},
};
use burn_sentiment::{
    datasets::{imdb, LoadableDataset, Split, SplitOptions},
    pipelines::text_classification::{
        self, evaluation::evaluate_dataset, Batcher, Config, ExportModel,
    },
    utils::plot,
};
use log::{info, LevelFilter};
use pico_args::Arguments;
use tokio::io::{self, AsyncBufReadExt};

#[cfg(not(feature = "tch"))]
type Backend = burn::backend::Autodiff<burn::backend::NdArray>;

#[cfg(feature = "tch")]
type Backend = burn::backend::Autodiff<burn::backend::LibTorch>;

type InnerBackend = <Backend as AutodiffBackend>::InnerBackend;

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help           Print help
  -c, --config         Path to a JSON experiment config to start from
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -n, --num-epochs     Number of epochs to train for (defaults to 25)
  -b, --batch-size     Batch size (defaults to 32)
  -s, --seed           Seed for the split, shuffling, and initialization (defaults to 42)
  -i, --interactive    Read reviews from stdin after training and print their predictions
";

/// Short movie reviews
const EXAMPLES: &[&str] = &[
    "The movie was great!",
    "The movie was okay.",
    "The movie was terrible...",
];

/// Longer movie reviews
const REVIEWS: &[&str] = &[
    "The movie was great!",
    "The movie was okay.",
    "The movie was terrible...",
    "I really enjoyed watching this,  I would definitely watch it again!",
    "Worst one so far, not a good experience. The music was good though",
    "In some bizarre way, this film just clicked for me...",
    "Visually this film is amazing in every way, the amount of detail and wonderful CGI is just pure eye candy. I loved the 3D, although it wasn't quite necessary,but hey, 3D is the standard these days for films in cinema. Overall, I do not think in my own humble and honest opinion that this move deserves the hate from the critics. Most movie goers, people I know who have seen the film, liked it. It is not a masterpiece. Long way from that. It is not an Oscarwinning film by no means. It's just a really fun film to watch.",
    "A film that utterly lacked any substance. There was promise at the beginning with a great opening introducing us to the anti-heroes which was awesome. And then.... Nothing? Stranded such a talented cast fighting comical looking goons and an anti-climax of a villian. The two stars are for Viola Davis and Margot Robbie who give their roles everything. Every other character is disposable and forgettable. And Jared Leto as the Joker? Lets say no more.",
    "Is this movie terrible? Absolutely not. Is this movie great? Absolutely not. I always heard from people that they either HATED or LOVED this movie. And for me it was neither. The audience for this film is served with a classic action movie/comic book. The world is in danger! There must be a solution! Although there are bumps between the characters along the way, eventually, we'll solve the problem",
    "The interesting twist is *supposed* to be that instead of classic superheroes, we have bad guys. To that I say 'so what?'. The movie didn't really establish why I should care about much of what was going on on screen—it was all just classic popcorn movie action and sequences that were occasionally broken up by half-attempts at character development.",
];

/// Restaurant reviews, outside the training domain
const RESTAURANT_REVIEWS: &[&str] = &[
    "Had running buffet the other day after a trade show. Food was good. Price was low. We ate faster than it could refill the buffet. Had enough to eat in the end though. Parking: There is a parking garage nearby!",
    "Eaten once during winter. It was unpleasantly cold and the dishes were bland and heated up quickly. I didn't like the food. Not even when I once ate at people's houses who always took away here",
    "It is very cosy here.  The meal is fine. The service very obliging despite it being very busy now.",
    "I ordered food from them and when I got home there were black hairs in the food.  So no not recommended.",
    "Just got 'Chinese' here for the first time. Large portions, prices not crazy expensive. Then again, I found the peanut sauce really tasteless and very greasy, almost had to throw away all the food just to avoid eating dry rice. If you are used to regular Chinese, I will therefore not recommend it.",
];

/// Number of vocabulary entries printed after adapting
const VOCABULARY_PREVIEW: usize = 50;

#[derive(Debug)]
struct Args {
    config: Option<String>,
    data_dir: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    seed: Option<u64>,
    interactive: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            interactive: pargs.contains(["-i", "--interactive"]),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    /// Start from the defaults or a config file, then apply command line overrides
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .map_err(|e| anyhow!("Unable to load config file {}: {}", path, e))?,
            None => Config::new(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.to_string();
        }

        if let Some(num_epochs) = self.num_epochs {
            config.num_epochs = num_epochs;
        }

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        Ok(config)
    }
}

#[cfg(not(feature = "tch"))]
fn device() -> <Backend as BackendTrait>::Device {
    burn::backend::ndarray::NdArrayDevice::Cpu
}

#[cfg(feature = "tch")]
fn device() -> <Backend as BackendTrait>::Device {
    burn::backend::libtorch::LibTorchDevice::Cuda(0)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let output = Args::parse()?;

    let Some(args) = output else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.config()?;

    println!("burn-sentiment {}", env!("CARGO_PKG_VERSION"));
    println!("=======");
    println!("IMDB Sentiment Classification");
    println!("=======");

    // Dataset acquisition and loading
    let root = imdb::acquire(Path::new(&config.data_dir)).await?;
    let options = SplitOptions::new(config.seed, config.validation_split);

    info!("Creating training dataset...");
    let train = imdb::Dataset::load(&root, Split::Train, options).await?;

    for (id, name) in train.class_names().iter().enumerate() {
        info!("Label {} is {}", id, name);
    }

    info!("Creating validation dataset...");
    let valid = imdb::Dataset::load(&root, Split::Validation, options).await?;

    info!("Creating test dataset...");
    let test = imdb::Dataset::load(&root, Split::Test, options).await?;

    let class_names = train.class_names().to_vec();

    if test.class_names() != class_names.as_slice() {
        bail!(
            "The test classes {:?} do not match the training classes {:?}",
            test.class_names(),
            class_names
        );
    }

    // Vocabulary from the training reviews only
    let mut vectorizer = config.vectorizer();
    vectorizer.adapt(train.texts());
    let vectorizer = Arc::new(vectorizer);

    info!(
        "Vocabulary has {} of at most {} tokens",
        vectorizer.vocab_size(),
        vectorizer.max_tokens()
    );

    for (id, token) in vectorizer
        .vocabulary()
        .iter()
        .take(VOCABULARY_PREVIEW)
        .enumerate()
    {
        println!("{} ---> {}", id, token);
    }

    let artifact_dir = config.artifact_dir();
    tokio::fs::create_dir_all(&artifact_dir).await?;
    config.save(format!("{artifact_dir}/config.json"))?;

    // Training
    let device = device();
    let trained = text_classification::train::<Backend, _, _>(
        device.clone(),
        train,
        valid,
        &class_names,
        vectorizer.clone(),
        &config,
    )?;

    let model = trained.model.valid();

    // Evaluation on the vectorized test reviews
    let batcher_test =
        Batcher::<InnerBackend>::new(vectorizer.clone(), &class_names, device.clone());
    let evaluation = evaluate_dataset(&model, batcher_test, test.clone(), config.batch_size)?;

    println!("Loss: {}", evaluation.loss);
    println!("Accuracy: {}", evaluation.accuracy);

    let artifact_dir = Path::new(&artifact_dir);
    plot::plot_loss(&trained.history, &artifact_dir.join("loss.svg"))?;
    plot::plot_accuracy(&trained.history, &artifact_dir.join("accuracy.svg"))?;
    info!("Saved training curves to {}", artifact_dir.display());

    // The same weights behind the vectorizer and a sigmoid, taking raw strings
    let export = ExportModel::new(vectorizer, &class_names, model, device);

    let raw = export.evaluate(&test, config.batch_size)?;
    println!("{}", raw.accuracy);

    info!("Examples:");
    println!("{:?}", export.predict(EXAMPLES));

    println!("{:?}", export.predict(REVIEWS));
    println!("{:?}", REVIEWS);

    info!("Restaurant reviews:");
    println!("{:?}", export.predict(RESTAURANT_REVIEWS));
    println!("{:?}", RESTAURANT_REVIEWS);

    if args.interactive {
        prompt(&export).await?;
    }

    Ok(())
}

/// Predict each review typed on stdin until it is closed
async fn prompt(export: &ExportModel<InnerBackend>) -> anyhow::Result<()> {
    let mut lines = io::BufReader::new(io::stdin()).lines();

    info!("Prompt:");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        println!("{:?}", export.predict(&[line]));

        info!("Prompt:");
    }

    Ok(())
}
