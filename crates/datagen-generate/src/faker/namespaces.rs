use chrono::{Duration, SecondsFormat, Utc};
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryCode, CountryName, StateName, StreetName, TimeZone, ZipCode,
};
use fake::faker::company::en::{Bs, Buzzword, BuzzwordMiddle, BuzzwordTail, CompanyName, Industry};
use fake::faker::internet::en::{DomainSuffix, IPv4, IPv6, Password, SafeEmail, UserAgent, Username};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name, Suffix, Title};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::distr::Uniform;
use rand::seq::SliceRandom;
use rhai::{Array, Dynamic, Engine, EvalAltResult, Map};

use super::Faker;

type FnResult<T> = Result<T, Box<EvalAltResult>>;

const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;
/// Upper bound for lengths and counts generated in native code.
const MAX_GENERATED_LEN: usize = 1 << 20;
const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone)]
pub struct PersonNs(Faker);
#[derive(Debug, Clone)]
pub struct InternetNs(Faker);
#[derive(Debug, Clone)]
pub struct LocationNs(Faker);
#[derive(Debug, Clone)]
pub struct LoremNs(Faker);
#[derive(Debug, Clone)]
pub struct CompanyNs(Faker);
#[derive(Debug, Clone)]
pub struct PhoneNs(Faker);
#[derive(Debug, Clone)]
pub struct NumberNs(Faker);
#[derive(Debug, Clone)]
pub struct DatatypeNs(Faker);
#[derive(Debug, Clone)]
pub struct StringNs(Faker);
#[derive(Debug, Clone)]
pub struct DateNs(Faker);
#[derive(Debug, Clone)]
pub struct HelpersNs(Faker);

/// Register the `Faker` type and all of its namespaces on `engine`.
pub fn register(engine: &mut Engine) {
    engine
        .register_type_with_name::<Faker>("Faker")
        .register_get("person", |f: &mut Faker| PersonNs(f.clone()))
        .register_get("internet", |f: &mut Faker| InternetNs(f.clone()))
        .register_get("location", |f: &mut Faker| LocationNs(f.clone()))
        .register_get("lorem", |f: &mut Faker| LoremNs(f.clone()))
        .register_get("company", |f: &mut Faker| CompanyNs(f.clone()))
        .register_get("phone", |f: &mut Faker| PhoneNs(f.clone()))
        .register_get("number", |f: &mut Faker| NumberNs(f.clone()))
        .register_get("datatype", |f: &mut Faker| DatatypeNs(f.clone()))
        .register_get("string", |f: &mut Faker| StringNs(f.clone()))
        .register_get("date", |f: &mut Faker| DateNs(f.clone()))
        .register_get("helpers", |f: &mut Faker| HelpersNs(f.clone()));

    register_person(engine);
    register_internet(engine);
    register_location(engine);
    register_lorem(engine);
    register_company(engine);
    register_number(engine);
    register_string(engine);
    register_date(engine);
    register_helpers(engine);

    engine
        .register_type_with_name::<PhoneNs>("PhoneModule")
        .register_fn("number", |ns: &mut PhoneNs| -> String { ns.0.fake(PhoneNumber()) });
    engine
        .register_type_with_name::<DatatypeNs>("DatatypeModule")
        .register_fn("boolean", |ns: &mut DatatypeNs| -> bool {
            ns.0.with_rng(|rng| rng.random_bool(0.5))
        });
}

fn register_person(engine: &mut Engine) {
    engine
        .register_type_with_name::<PersonNs>("PersonModule")
        .register_fn("fullName", |ns: &mut PersonNs| -> String { ns.0.fake(Name()) })
        .register_fn("firstName", |ns: &mut PersonNs| -> String { ns.0.fake(FirstName()) })
        .register_fn("lastName", |ns: &mut PersonNs| -> String { ns.0.fake(LastName()) })
        .register_fn("prefix", |ns: &mut PersonNs| -> String { ns.0.fake(Title()) })
        .register_fn("suffix", |ns: &mut PersonNs| -> String { ns.0.fake(Suffix()) })
        .register_fn("jobTitle", |ns: &mut PersonNs| -> String { ns.0.fake(JobTitle()) });
}

fn register_internet(engine: &mut Engine) {
    engine
        .register_type_with_name::<InternetNs>("InternetModule")
        .register_fn("email", |ns: &mut InternetNs| -> String { ns.0.fake(SafeEmail()) })
        .register_fn("userName", |ns: &mut InternetNs| -> String { ns.0.fake(Username()) })
        .register_fn("password", |ns: &mut InternetNs| -> String {
            ns.0.fake(Password(12..20))
        })
        .register_fn("domainName", |ns: &mut InternetNs| domain_name(&ns.0))
        .register_fn("url", |ns: &mut InternetNs| format!("https://{}", domain_name(&ns.0)))
        .register_fn("ipv4", |ns: &mut InternetNs| -> String { ns.0.fake(IPv4()) })
        .register_fn("ipv6", |ns: &mut InternetNs| -> String { ns.0.fake(IPv6()) })
        .register_fn("userAgent", |ns: &mut InternetNs| -> String { ns.0.fake(UserAgent()) });
}

fn domain_name(faker: &Faker) -> String {
    let word: String = faker.fake(Word());
    let suffix: String = faker.fake(DomainSuffix());
    format!("{}.{}", word.to_lowercase(), suffix)
}

fn register_location(engine: &mut Engine) {
    engine
        .register_type_with_name::<LocationNs>("LocationModule")
        .register_fn("city", |ns: &mut LocationNs| -> String { ns.0.fake(CityName()) })
        .register_fn("country", |ns: &mut LocationNs| -> String { ns.0.fake(CountryName()) })
        .register_fn("countryCode", |ns: &mut LocationNs| -> String {
            ns.0.fake(CountryCode())
        })
        .register_fn("state", |ns: &mut LocationNs| -> String { ns.0.fake(StateName()) })
        .register_fn("street", |ns: &mut LocationNs| -> String { ns.0.fake(StreetName()) })
        .register_fn("streetAddress", |ns: &mut LocationNs| {
            let number: String = ns.0.fake(BuildingNumber());
            let street: String = ns.0.fake(StreetName());
            format!("{number} {street}")
        })
        .register_fn("zipCode", |ns: &mut LocationNs| -> String { ns.0.fake(ZipCode()) })
        .register_fn("timeZone", |ns: &mut LocationNs| -> String { ns.0.fake(TimeZone()) })
        .register_fn("latitude", |ns: &mut LocationNs| -> f64 {
            ns.0.with_rng(|rng| round_to(rng.random_range(-90.0..=90.0), 4))
        })
        .register_fn("longitude", |ns: &mut LocationNs| -> f64 {
            ns.0.with_rng(|rng| round_to(rng.random_range(-180.0..=180.0), 4))
        });
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

fn register_lorem(engine: &mut Engine) {
    engine
        .register_type_with_name::<LoremNs>("LoremModule")
        .register_fn("word", |ns: &mut LoremNs| -> String { ns.0.fake(Word()) })
        .register_fn("words", |ns: &mut LoremNs| -> String {
            let words: Vec<String> = ns.0.fake(Words(3..4));
            words.join(" ")
        })
        .register_fn("words", |ns: &mut LoremNs, count: i64| -> FnResult<String> {
            let count = length_arg(count, "faker.lorem.words")?;
            let words: Vec<String> = ns.0.fake(Words(count..count + 1));
            Ok(words.join(" "))
        })
        .register_fn("sentence", |ns: &mut LoremNs| -> String { ns.0.fake(Sentence(3..10)) })
        .register_fn("paragraph", |ns: &mut LoremNs| -> String {
            ns.0.fake(Paragraph(3..6))
        });
}

fn register_company(engine: &mut Engine) {
    engine
        .register_type_with_name::<CompanyNs>("CompanyModule")
        .register_fn("name", |ns: &mut CompanyNs| -> String { ns.0.fake(CompanyName()) })
        .register_fn("catchPhrase", |ns: &mut CompanyNs| {
            let head: String = ns.0.fake(Buzzword());
            let middle: String = ns.0.fake(BuzzwordMiddle());
            let tail: String = ns.0.fake(BuzzwordTail());
            format!("{head} {middle} {tail}")
        })
        .register_fn("buzzPhrase", |ns: &mut CompanyNs| -> String { ns.0.fake(Bs()) })
        .register_fn("industry", |ns: &mut CompanyNs| -> String { ns.0.fake(Industry()) });
}

fn register_number(engine: &mut Engine) {
    engine
        .register_type_with_name::<NumberNs>("NumberModule")
        .register_fn("int", |ns: &mut NumberNs| random_int(&ns.0, 0, MAX_SAFE_INTEGER))
        .register_fn("int", |ns: &mut NumberNs, max: i64| random_int(&ns.0, 0, max))
        .register_fn("int", |ns: &mut NumberNs, min: i64, max: i64| {
            random_int(&ns.0, min, max)
        })
        .register_fn("int", |ns: &mut NumberNs, options: Map| -> FnResult<i64> {
            let min = int_option(&options, "min")?.unwrap_or(0);
            let max = int_option(&options, "max")?.unwrap_or(MAX_SAFE_INTEGER);
            random_int(&ns.0, min, max)
        })
        .register_fn("float", |ns: &mut NumberNs| -> f64 {
            ns.0.with_rng(|rng| rng.random::<f64>())
        })
        .register_fn("float", |ns: &mut NumberNs, min: f64, max: f64| {
            random_float(&ns.0, min, max)
        })
        .register_fn("float", |ns: &mut NumberNs, min: i64, max: i64| {
            random_float(&ns.0, min as f64, max as f64)
        })
        .register_fn("float", |ns: &mut NumberNs, min: i64, max: f64| {
            random_float(&ns.0, min as f64, max)
        })
        .register_fn("float", |ns: &mut NumberNs, min: f64, max: i64| {
            random_float(&ns.0, min, max as f64)
        })
        .register_fn("float", |ns: &mut NumberNs, options: Map| -> FnResult<f64> {
            let min = float_option(&options, "min")?.unwrap_or(0.0);
            let max = float_option(&options, "max")?.unwrap_or(1.0);
            random_float(&ns.0, min, max)
        });
}

fn random_int(faker: &Faker, min: i64, max: i64) -> FnResult<i64> {
    if min > max {
        return Err(format!("faker.number.int: min {min} is greater than max {max}").into());
    }
    Ok(faker.with_rng(|rng| rng.random_range(min..=max)))
}

fn random_float(faker: &Faker, min: f64, max: f64) -> FnResult<f64> {
    if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
        return Err(format!("faker.number.float: range {min}..{max} is not finite").into());
    }
    if min > max {
        return Err(format!("faker.number.float: min {min} is greater than max {max}").into());
    }
    let range = Uniform::new_inclusive(min, max)
        .map_err(|err| format!("faker.number.float: range {min}..{max}: {err}"))?;
    Ok(faker.with_rng(|rng| rng.sample(range)))
}

fn int_option(options: &Map, key: &str) -> FnResult<Option<i64>> {
    match options.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_int()
            .map(Some)
            .map_err(|actual| format!("option '{key}' must be an integer, got {actual}").into()),
    }
}

fn float_option(options: &Map, key: &str) -> FnResult<Option<f64>> {
    match options.get(key) {
        None => Ok(None),
        Some(value) => {
            if let Ok(int) = value.as_int() {
                return Ok(Some(int as f64));
            }
            value
                .as_float()
                .map(Some)
                .map_err(|actual| format!("option '{key}' must be a number, got {actual}").into())
        }
    }
}

fn length_arg(value: i64, what: &str) -> FnResult<usize> {
    let length =
        usize::try_from(value).map_err(|_| format!("{what}: length must not be negative"))?;
    if length > MAX_GENERATED_LEN {
        return Err(format!("{what}: length {length} exceeds the limit of {MAX_GENERATED_LEN}").into());
    }
    Ok(length)
}

fn register_string(engine: &mut Engine) {
    engine
        .register_type_with_name::<StringNs>("StringModule")
        .register_fn("uuid", |ns: &mut StringNs| {
            let bytes: [u8; 16] = ns.0.with_rng(|rng| rng.random());
            uuid::Builder::from_random_bytes(bytes)
                .into_uuid()
                .to_string()
        })
        .register_fn("alpha", |ns: &mut StringNs, length: i64| {
            random_chars(&ns.0, ALPHA, length, "faker.string.alpha")
        })
        .register_fn("numeric", |ns: &mut StringNs, length: i64| {
            random_chars(&ns.0, DIGITS, length, "faker.string.numeric")
        })
        .register_fn("alphanumeric", |ns: &mut StringNs, length: i64| {
            random_chars(&ns.0, ALPHANUMERIC, length, "faker.string.alphanumeric")
        });
}

fn random_chars(faker: &Faker, charset: &[u8], length: i64, what: &str) -> FnResult<String> {
    let length = length_arg(length, what)?;
    Ok(faker.with_rng(|rng| {
        (0..length)
            .map(|_| charset[rng.random_range(0..charset.len())] as char)
            .collect()
    }))
}

fn register_date(engine: &mut Engine) {
    engine
        .register_type_with_name::<DateNs>("DateModule")
        .register_fn("past", |ns: &mut DateNs| offset_date(&ns.0, -365 * 86_400, -1))
        .register_fn("future", |ns: &mut DateNs| offset_date(&ns.0, 1, 365 * 86_400))
        .register_fn("recent", |ns: &mut DateNs| offset_date(&ns.0, -86_400, -1))
        .register_fn("birthdate", |ns: &mut DateNs| {
            offset_date(&ns.0, -80 * 365 * 86_400, -18 * 365 * 86_400)
        });
}

fn offset_date(faker: &Faker, min_secs: i64, max_secs: i64) -> String {
    let offset = faker.with_rng(|rng| rng.random_range(min_secs..=max_secs));
    (Utc::now() + Duration::seconds(offset)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn register_helpers(engine: &mut Engine) {
    engine
        .register_type_with_name::<HelpersNs>("HelpersModule")
        .register_fn("arrayElement", |ns: &mut HelpersNs, items: Array| -> FnResult<Dynamic> {
            if items.is_empty() {
                return Err("faker.helpers.arrayElement: cannot pick from an empty array".into());
            }
            let index = ns.0.with_rng(|rng| rng.random_range(0..items.len()));
            Ok(items[index].clone())
        })
        .register_fn("shuffle", |ns: &mut HelpersNs, mut items: Array| -> Array {
            ns.0.with_rng(|rng| items.shuffle(rng));
            items
        });
}
