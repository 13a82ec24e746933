use super::*;

mod assert_abort;
mod session_runs;

fn recorder_with_expect() -> (Rc<RefCell<Recorder>>, Expect) {
    let recorder = Recorder::shared();
    let expect = Expect::new(recorder.clone());
    (recorder, expect)
}

fn recorder_with_assert() -> (Rc<RefCell<Recorder>>, Assert) {
    let recorder = Recorder::shared();
    let assert = Assert::new(recorder.clone());
    (recorder, assert)
}

fn obj(entries: Vec<(&str, Value)>) -> Value {
    Value::object(entries)
}

fn arr(elements: Vec<Value>) -> Value {
    Value::array(elements)
}
