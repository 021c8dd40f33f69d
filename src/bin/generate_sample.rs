use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const TYPES: [&str; 8] = [
    "Grass", "Fire", "Water", "Bug", "Normal", "Electric", "Rock", "Psychic",
];
const SYLLABLES: [&str; 12] = [
    "pi", "ka", "char", "bul", "squi", "mon", "ra", "zor", "lee", "tto", "dra", "nix",
];
const PER_GENERATION: u32 = 40;
const GENERATIONS: u32 = 4;

/// One generated catalog row, serialized with the dashboard's column names.
#[derive(Debug, Serialize)]
struct Creature {
    dexnum: u32,
    name: String,
    type1: String,
    generation: u32,
    special_group: String,
    hp: f64,
    attack: f64,
    defense: f64,
    speed: f64,
    sp_atk: f64,
    sp_def: f64,
    height: f64,
    weight: f64,
}

/// Deterministic splitmix64 stream so every run writes the same catalog.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate(rng: &mut SplitMix) -> Vec<Creature> {
    let mut creatures = Vec::new();
    for generation in 1..=GENERATIONS {
        for i in 0..PER_GENERATION {
            let dexnum = (generation - 1) * PER_GENERATION + i + 1;
            // The last two of each generation are legendary.
            let legendary = i >= PER_GENERATION - 2;
            let boost = if legendary { 1.6 } else { 1.0 };
            let stat = |rng: &mut SplitMix| (rng.range(30.0, 110.0) * boost).round();

            let name = format!(
                "{}{}{}",
                rng.pick(&SYLLABLES),
                rng.pick(&SYLLABLES),
                rng.pick(&SYLLABLES)
            );
            let height = (rng.range(0.2, 2.5) * boost * 10.0).round() / 10.0;

            creatures.push(Creature {
                dexnum,
                name,
                type1: rng.pick(&TYPES).to_string(),
                generation,
                special_group: if legendary { "Legendary" } else { "Ordinary" }.to_string(),
                hp: stat(rng),
                attack: stat(rng),
                defense: stat(rng),
                speed: stat(rng),
                sp_atk: stat(rng),
                sp_def: stat(rng),
                height,
                weight: (height * rng.range(8.0, 60.0) * 10.0).round() / 10.0,
            });
        }
    }
    creatures
}

fn write_csv(path: &str, creatures: &[Creature]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for c in creatures {
        writer.serialize(c).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, creatures: &[Creature]) -> Result<()> {
    let floats = |f: fn(&Creature) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(creatures.iter().map(f).collect::<Vec<_>>()))
    };
    let strings = |f: fn(&Creature) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(creatures.iter().map(f).collect::<Vec<_>>()))
    };
    let uints = |f: fn(&Creature) -> u32| -> ArrayRef {
        Arc::new(UInt32Array::from(creatures.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("dexnum", DataType::UInt32, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("type1", DataType::Utf8, false),
        Field::new("generation", DataType::UInt32, false),
        Field::new("special_group", DataType::Utf8, false),
        Field::new("hp", DataType::Float64, false),
        Field::new("attack", DataType::Float64, false),
        Field::new("defense", DataType::Float64, false),
        Field::new("speed", DataType::Float64, false),
        Field::new("sp_atk", DataType::Float64, false),
        Field::new("sp_def", DataType::Float64, false),
        Field::new("height", DataType::Float64, false),
        Field::new("weight", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            uints(|c| c.dexnum),
            strings(|c| c.name.as_str()),
            strings(|c| c.type1.as_str()),
            uints(|c| c.generation),
            strings(|c| c.special_group.as_str()),
            floats(|c| c.hp),
            floats(|c| c.attack),
            floats(|c| c.defense),
            floats(|c| c.speed),
            floats(|c| c.sp_atk),
            floats(|c| c.sp_def),
            floats(|c| c.height),
            floats(|c| c.weight),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix(42);
    let creatures = generate(&mut rng);

    write_csv("pokemon_data.csv", &creatures)?;
    write_parquet("pokemon_data.parquet", &creatures)?;

    println!(
        "Wrote {} creatures across {GENERATIONS} generations to pokemon_data.csv and pokemon_data.parquet",
        creatures.len()
    );
    Ok(())
}
